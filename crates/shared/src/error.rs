//! Error types for the upload domain

use thiserror::Error;

use crate::constants::{ERROR_FILE_TOO_LARGE, ERROR_INVALID_FILE_TYPE, ERROR_SESSION_FULL};

/// A record could not be built because a field was missing or had the wrong type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Schema validation failed for {record}: {message}")]
pub struct SchemaValidationError {
    pub record: &'static str,
    pub message: String,
}

impl SchemaValidationError {
    pub fn new(record: &'static str, message: impl Into<String>) -> Self {
        Self {
            record,
            message: message.into(),
        }
    }
}

/// Upload business rule broken by otherwise well-formed data.
///
/// The display text is exactly the matching message from [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRuleViolation {
    #[error("{msg}", msg = ERROR_FILE_TOO_LARGE)]
    FileTooLarge { filename: String, size: u64 },

    #[error("{msg}", msg = ERROR_INVALID_FILE_TYPE)]
    InvalidFileType { filename: String, mime_type: String },

    #[error("{msg}", msg = ERROR_SESSION_FULL)]
    SessionFull { file_count: usize },
}

impl UploadRuleViolation {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            Self::SessionFull { .. } => "SESSION_FULL",
        }
    }
}
