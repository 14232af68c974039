//! Snapped API Library
//!
//! This crate contains the API server components for the Snapped upload
//! service: configuration, the security headers middleware, and the upload
//! validation routes.

pub mod config;
pub mod error;
pub mod routes;
pub mod security;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
