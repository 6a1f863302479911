use axum::{extract::State, http::HeaderMap, response::Html};
use serde::Deserialize;

use crate::error::Result;
use crate::extractors::Query;
use crate::state::AppState;
use crate::util::extract_user_agent;
use crate::views;

/// Query Gumroad appends when redirecting the buyer after checkout.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub sale_id: Option<String>,
    pub product_id: Option<String>,
}

/// GET /success - fulfill a completed Gumroad sale.
///
/// Verifies the sale, creates a Keygen license and renders the license key
/// with a download link for the buyer's platform. Every failure renders the
/// error page instead.
pub async fn purchase_success(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SuccessQuery>,
) -> Result<Html<String>> {
    let user_agent = extract_user_agent(&headers);

    let fulfillment = state
        .orchestrator
        .fulfill(
            query.sale_id.as_deref(),
            query.product_id.as_deref(),
            user_agent.as_deref(),
        )
        .await?;

    Ok(views::render_success(&fulfillment))
}
