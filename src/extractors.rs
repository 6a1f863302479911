//! Extractors whose rejections render through [`AppError`].

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::extract::Query` that renders the error view instead of a plain-text 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
