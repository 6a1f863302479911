use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::VerifiedSale;

#[derive(Debug, Deserialize)]
struct SaleResponse {
    sale: VerifiedSale,
}

/// Looks up Gumroad sales to confirm a purchase happened.
#[derive(Debug, Clone)]
pub struct GumroadClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl GumroadClient {
    pub fn new(client: Client, base_url: &str, access_token: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Fetch the sale, failing with `InvalidSale` on any non-200 response.
    pub async fn verify_sale(&self, sale_id: &str) -> Result<VerifiedSale> {
        let url = format!(
            "{}/v2/sales/{}",
            self.base_url,
            urlencoding::encode(sale_id)
        );

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", &self.access_token)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::InvalidSale {
                sale_id: sale_id.to_string(),
                status: status.as_u16(),
            });
        }

        let body: SaleResponse = response.json().await?;
        Ok(body.sale)
    }
}
