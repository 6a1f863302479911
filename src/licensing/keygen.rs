use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::{License, LicenseKey, LicenseMetadata, SaleReference};

const JSON_API: &str = "application/vnd.api+json";

#[derive(Debug, Serialize)]
struct CreateLicenseRequest {
    data: LicenseData,
}

#[derive(Debug, Serialize)]
struct LicenseData {
    #[serde(rename = "type")]
    data_type: String,
    attributes: LicenseAttributes,
    relationships: LicenseRelationships,
}

#[derive(Debug, Serialize)]
struct LicenseAttributes {
    key: String,
    metadata: LicenseMetadata,
}

#[derive(Debug, Serialize)]
struct LicenseRelationships {
    policy: RelationshipData,
}

#[derive(Debug, Serialize, Deserialize)]
struct RelationshipData {
    data: RelationshipId,
}

#[derive(Debug, Serialize, Deserialize)]
struct RelationshipId {
    #[serde(rename = "type")]
    data_type: String,
    id: String,
}

/// Keygen answers with either `data` or `errors`.
#[derive(Debug, Deserialize)]
struct LicenseDocument {
    data: Option<LicenseResource>,
    errors: Option<Vec<ApiError>>,
}

#[derive(Debug, Deserialize)]
struct LicenseResource {
    id: String,
    attributes: LicenseResourceAttributes,
    relationships: Option<LicenseResourceRelationships>,
}

#[derive(Debug, Deserialize)]
struct LicenseResourceAttributes {
    key: String,
    name: Option<String>,
    status: Option<String>,
    expiry: Option<String>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct LicenseResourceRelationships {
    policy: Option<RelationshipData>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    title: Option<String>,
    detail: Option<String>,
    code: Option<String>,
}

impl ApiError {
    fn describe(self) -> String {
        self.detail
            .or(self.title)
            .or(self.code)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

impl From<LicenseResource> for License {
    fn from(resource: LicenseResource) -> Self {
        let policy_id = resource
            .relationships
            .and_then(|r| r.policy)
            .map(|p| p.data.id);

        License {
            id: resource.id,
            key: resource.attributes.key,
            name: resource.attributes.name,
            status: resource.attributes.status,
            expiry: resource.attributes.expiry,
            policy_id,
            metadata: resource.attributes.metadata,
        }
    }
}

/// Creates user-less licenses through the Keygen API.
#[derive(Debug, Clone)]
pub struct KeygenClient {
    client: Client,
    base_url: String,
    account_id: String,
    product_token: String,
    policy_id: String,
}

impl KeygenClient {
    pub fn new(
        client: Client,
        base_url: &str,
        account_id: &str,
        product_token: &str,
        policy_id: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.to_string(),
            product_token: product_token.to_string(),
            policy_id: policy_id.to_string(),
        }
    }

    fn create_request(&self, key: &LicenseKey, order: &SaleReference) -> CreateLicenseRequest {
        CreateLicenseRequest {
            data: LicenseData {
                data_type: "licenses".to_string(),
                attributes: LicenseAttributes {
                    key: key.to_string(),
                    metadata: LicenseMetadata {
                        gumroad_product_id: order.product_id.clone(),
                        gumroad_sale_id: order.sale_id.clone(),
                    },
                },
                relationships: LicenseRelationships {
                    policy: RelationshipData {
                        data: RelationshipId {
                            data_type: "policies".to_string(),
                            id: self.policy_id.clone(),
                        },
                    },
                },
            },
        }
    }

    /// Create a license with the given key, bound to the configured policy.
    ///
    /// An `errors` document becomes `ProvisioningFailed` carrying each error's detail.
    pub async fn create_license(&self, key: &LicenseKey, order: &SaleReference) -> Result<License> {
        let url = format!(
            "{}/v1/accounts/{}/licenses",
            self.base_url,
            urlencoding::encode(&self.account_id)
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.product_token))
            .header("Accept", JSON_API)
            .header("Content-Type", JSON_API)
            .json(&self.create_request(key, order))
            .send()
            .await?;

        let status = response.status();
        let document: LicenseDocument = response.json().await?;

        match document {
            LicenseDocument {
                errors: Some(errors),
                ..
            } if !errors.is_empty() => Err(AppError::ProvisioningFailed {
                details: errors.into_iter().map(ApiError::describe).collect(),
            }),
            LicenseDocument {
                data: Some(resource),
                ..
            } => Ok(resource.into()),
            _ => Err(AppError::ProvisioningFailed {
                details: vec![format!("no license in response (status {})", status.as_u16())],
            }),
        }
    }
}
