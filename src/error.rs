use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum::AsRefStr;
use thiserror::Error;

use crate::views;

pub type Result<T> = std::result::Result<T, AppError>;

pub const MISSING_ORDER_DETAILS_MESSAGE: &str = "Missing order details.";
pub const INVALID_SALE_MESSAGE: &str = "Invalid sale ID.";
pub const PROVISIONING_FAILED_MESSAGE: &str =
    "There was an error while creating your license. Please contact support.";
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Something went wrong while processing your order. Please contact support.";

/// Errors that end a fulfillment request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing order details")]
    MissingOrderDetails,

    #[error("sale {sale_id} was rejected by the sale verification service (status {status})")]
    InvalidSale { sale_id: String, status: u16 },

    #[error("license provisioning failed: {}", details.join(", "))]
    ProvisioningFailed { details: Vec<String> },

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    MissingOrderDetails,
    InvalidSale,
    ProvisioningFailed,
    Upstream,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingOrderDetails => ErrorKind::MissingOrderDetails,
            AppError::InvalidSale { .. } => ErrorKind::InvalidSale,
            AppError::ProvisioningFailed { .. } => ErrorKind::ProvisioningFailed,
            AppError::Upstream(_) => ErrorKind::Upstream,
        }
    }

    /// Message shown to the buyer. Never includes upstream detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::MissingOrderDetails => MISSING_ORDER_DETAILS_MESSAGE,
            AppError::InvalidSale { .. } => INVALID_SALE_MESSAGE,
            AppError::ProvisioningFailed { .. } => PROVISIONING_FAILED_MESSAGE,
            AppError::Upstream(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingOrderDetails | AppError::InvalidSale { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::ProvisioningFailed { .. } | AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected order query: {}", rejection.body_text());
        AppError::MissingOrderDetails
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match &self {
            AppError::Upstream(e) => {
                tracing::error!(kind = kind.as_ref(), "Unhandled upstream failure: {}", e);
            }
            _ => {
                tracing::debug!(kind = kind.as_ref(), "Fulfillment ended: {}", self);
            }
        }

        (self.status_code(), views::render_error(self.user_message())).into_response()
    }
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}
