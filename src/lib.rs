pub mod config;
pub mod error;
pub mod extractors;
pub mod fulfillment;
pub mod handlers;
pub mod licensing;
pub mod models;
pub mod payments;
pub mod state;
pub mod util;
pub mod views;
