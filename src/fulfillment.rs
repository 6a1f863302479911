//! Order fulfillment: verify a Gumroad sale, create a Keygen license, build a download link.

use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::licensing::{Distribution, KeygenClient};
use crate::models::{License, LicenseKey, Platform, SaleReference, VerifiedSale};
use crate::payments::GumroadClient;

/// Everything the success page shows.
#[derive(Debug, Clone, Serialize)]
pub struct Fulfillment {
    pub download_link: String,
    pub platform: Platform,
    pub license: License,
    pub sale: VerifiedSale,
}

/// Stateless; one instance serves every request.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    gumroad: GumroadClient,
    keygen: KeygenClient,
    distribution: Distribution,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Self {
        let client = Client::new();

        Self {
            gumroad: GumroadClient::new(
                client.clone(),
                &config.gumroad_api_url,
                &config.gumroad_access_token,
            ),
            keygen: KeygenClient::new(
                client,
                &config.keygen_api_url,
                &config.keygen_account_id,
                &config.keygen_product_token,
                &config.keygen_policy_id,
            ),
            distribution: Distribution::new(
                &config.keygen_dist_url,
                &config.keygen_account_id,
                &config.keygen_product_id,
                &config.keygen_policy_id,
            ),
        }
    }

    /// Run the whole pipeline for one redirect from Gumroad.
    ///
    /// A license is only created after the sale has been verified, and a failed
    /// creation is never retried.
    pub async fn fulfill(
        &self,
        sale_id: Option<&str>,
        product_id: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<Fulfillment> {
        let order = SaleReference::new(sale_id, product_id)?;

        let sale = self.gumroad.verify_sale(&order.sale_id).await?;

        let key = LicenseKey::generate();
        let license = self
            .keygen
            .create_license(&key, &order)
            .await
            .inspect_err(|e| {
                // The buyer may have been charged without getting a license.
                let kind = e.kind();
                tracing::error!(
                    sale_id = %order.sale_id,
                    product_id = %order.product_id,
                    kind = kind.as_ref(),
                    "Received error while creating license: {}",
                    e
                );
            })?;

        let platform = Platform::from_user_agent(user_agent);
        if platform == Platform::Unknown {
            tracing::info!(
                sale_id = %order.sale_id,
                user_agent = user_agent.unwrap_or_default(),
                "No release platform detected for client"
            );
        }

        let download_link = self.distribution.download_link(platform, &license.key);

        tracing::info!(
            sale_id = %order.sale_id,
            product_id = %order.product_id,
            license_id = %license.id,
            platform = platform.as_ref(),
            "License created"
        );

        Ok(Fulfillment {
            download_link,
            platform,
            license,
            sale,
        })
    }
}
