use std::fmt;

use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Random bytes per key. 8 bytes render as 16 hex characters.
const KEY_BYTES: usize = 8;
const GROUP_LEN: usize = 4;

/// Short, human-shareable license key in the form `xxxx-xxxx-xxxx-xxxx`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LicenseKey(String);

impl LicenseKey {
    /// Generate a new key from the operating system's CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8; KEY_BYTES]) -> Self {
        let hex = hex::encode(bytes);
        let groups: Vec<&str> = (0..hex.len())
            .step_by(GROUP_LEN)
            .map(|i| &hex[i..i + GROUP_LEN])
            .collect();
        Self(groups.join("-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata attached to every license, linking it back to the Gumroad sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseMetadata {
    pub gumroad_product_id: String,
    pub gumroad_sale_id: String,
}

/// License as created by Keygen.
#[derive(Debug, Clone, Serialize)]
pub struct License {
    pub id: String,
    pub key: String,
    pub name: Option<String>,
    pub status: Option<String>,
    /// RFC 3339 timestamp, None for perpetual licenses
    pub expiry: Option<String>,
    pub policy_id: Option<String>,
    pub metadata: Map<String, Value>,
}
