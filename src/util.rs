//! Request helpers shared by handlers.

use axum::http::{HeaderMap, header::USER_AGENT};

/// Extract the `user-agent` header.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so an
/// unusual client still gets its order fulfilled.
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}
