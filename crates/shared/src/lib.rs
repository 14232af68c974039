//! Snapped Shared Upload Types
//!
//! This crate contains the upload domain schema shared across the Snapped
//! platform: constants, record types, schema errors and upload rule checks.

pub mod constants;
pub mod error;
pub mod rules;
pub mod types;

pub use constants::*;
pub use error::*;
pub use types::*;
