//! Application configuration

use std::env;

use axum::http::HeaderValue;

/// Origins allowed by the CSP `connect-src` directive when `CSP_CONNECT_SRC` is unset
pub const DEFAULT_CONNECT_SRC: [&str; 4] = [
    "https://*.amazonaws.com",
    "https://*.snapped.cc",
    "https://*.b-cdn.net",
    "https://*.cloudfront.net",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub max_request_body_bytes: usize,

    // Security headers
    pub csp_connect_src: Vec<String>,

    // CORS
    pub cors_allowed_origins: Vec<HeaderValue>,

    // Logging
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_request_body_bytes: 1024 * 1024,
            csp_connect_src: DEFAULT_CONNECT_SRC.iter().map(|s| s.to_string()).collect(),
            cors_allowed_origins: vec![HeaderValue::from_static("http://localhost:3000")],
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            max_request_body_bytes: env::var("MAX_REQUEST_BODY_BYTES")
                .unwrap_or_else(|_| "1048576".to_string()) // 1MB default
                .parse()
                .unwrap_or(1048576),

            // Security headers
            csp_connect_src: match env::var("CSP_CONNECT_SRC") {
                Ok(raw) => parse_connect_src(&raw)?,
                Err(_) => DEFAULT_CONNECT_SRC.iter().map(|s| s.to_string()).collect(),
            },

            // CORS
            cors_allowed_origins: parse_cors_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            )?,

            // Logging
            log_format: match env::var("LOG_FORMAT") {
                Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }
}

/// Split a comma or whitespace separated origin list for `connect-src`.
/// Origins themselves are checked when the security headers are built.
fn parse_connect_src(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        return Err(ConfigError::Empty("CSP_CONNECT_SRC"));
    }

    Ok(origins)
}

fn parse_cors_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} must not be empty")]
    Empty(&'static str),
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),
}
