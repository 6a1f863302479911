mod success;

pub use success::*;

use std::any::Any;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::state::AppState;
use crate::views;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/success", get(purchase_success))
}

/// Full application: routes, request tracing, and panic isolation.
pub fn app(state: AppState) -> Router {
    router()
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A panicking request is logged and answered with the error page; the server keeps running.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!("Unhandled failure while serving request: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        views::render_error(INTERNAL_ERROR_MESSAGE),
    )
        .into_response()
}
