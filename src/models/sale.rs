use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Sale and product identifiers the buyer was redirected with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleReference {
    pub sale_id: String,
    pub product_id: String,
}

impl SaleReference {
    /// Both identifiers are required. Empty strings count as missing.
    pub fn new(sale_id: Option<&str>, product_id: Option<&str>) -> Result<Self> {
        match (non_empty(sale_id), non_empty(product_id)) {
            (Some(sale_id), Some(product_id)) => Ok(Self {
                sale_id: sale_id.to_string(),
                product_id: product_id.to_string(),
            }),
            _ => Err(AppError::MissingOrderDetails),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Sale record returned by Gumroad. Kept opaque and only rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifiedSale(pub Value);

impl VerifiedSale {
    /// String field of the sale record, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}
