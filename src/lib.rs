//! Widget Functions: Shared Library
//!
//! Upstream clients, models and handler logic for the review widget and
//! quiz lead endpoints.
//!
//! Each serverless function in `api/` imports from this library
//! to keep handlers thin and logic reusable.

pub mod config;
pub mod email;
pub mod endpoint;
pub mod error;
pub mod google;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod pagination;

pub use config::Config;
pub use error::{ApiError, Result};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
