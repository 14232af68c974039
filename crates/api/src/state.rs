//! Shared application state

use std::sync::Arc;

use crate::{config::Config, security::SecurityHeaders};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub security_headers: Arc<SecurityHeaders>,
}

impl AppState {
    /// Build state from configuration. Fails if a configured `connect-src`
    /// origin is empty or contains `;`, `,`, whitespace or control characters.
    pub fn new(config: Config) -> Result<Self, crate::security::InvalidPolicy> {
        let security_headers = SecurityHeaders::new(config.csp_connect_src.as_slice())?;
        Ok(Self {
            config: Arc::new(config),
            security_headers: Arc::new(security_headers),
        })
    }
}
