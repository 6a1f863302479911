use std::env;

use crate::error::ConfigError;

pub const DEFAULT_GUMROAD_API_URL: &str = "https://api.gumroad.com";
pub const DEFAULT_KEYGEN_API_URL: &str = "https://api.keygen.sh";
pub const DEFAULT_KEYGEN_DIST_URL: &str = "https://dist.keygen.sh";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Gumroad access token used to look up sales
    pub gumroad_access_token: String,
    /// Keygen product token used to create licenses
    pub keygen_product_token: String,
    pub keygen_account_id: String,
    pub keygen_product_id: String,
    /// Policy every new license is bound to
    pub keygen_policy_id: String,
    pub gumroad_api_url: String,
    pub keygen_api_url: String,
    pub keygen_dist_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let host = get("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = get("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Ok(Self {
            host,
            port,
            gumroad_access_token: require("GUMROAD_ACCESS_TOKEN")?,
            keygen_product_token: require("KEYGEN_PRODUCT_TOKEN")?,
            keygen_account_id: require("KEYGEN_ACCOUNT_ID")?,
            keygen_product_id: require("KEYGEN_PRODUCT_ID")?,
            keygen_policy_id: require("KEYGEN_POLICY_ID")?,
            gumroad_api_url: get("GUMROAD_API_URL")
                .unwrap_or_else(|| DEFAULT_GUMROAD_API_URL.to_string()),
            keygen_api_url: get("KEYGEN_API_URL")
                .unwrap_or_else(|| DEFAULT_KEYGEN_API_URL.to_string()),
            keygen_dist_url: get("KEYGEN_DIST_URL")
                .unwrap_or_else(|| DEFAULT_KEYGEN_DIST_URL.to_string()),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
