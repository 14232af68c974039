//! Upload record types

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::constants::{
    UPLOAD_STATUS_COMPLETE, UPLOAD_STATUS_ERROR, UPLOAD_STATUS_PENDING, UPLOAD_STATUS_PROCESSING,
};
use crate::error::SchemaValidationError;

// =============================================================================
// Record construction
// =============================================================================

/// A record shape that is built from untrusted JSON.
///
/// Construction either yields a fully typed value or a
/// [`SchemaValidationError`]; there is no partially-valid state.
pub trait Record: DeserializeOwned {
    /// Name used in validation errors
    const NAME: &'static str;

    fn from_value(value: Value) -> Result<Self, SchemaValidationError> {
        serde_json::from_value(value).map_err(|e| SchemaValidationError::new(Self::NAME, e.to_string()))
    }

    fn from_json(raw: &str) -> Result<Self, SchemaValidationError> {
        serde_json::from_str(raw).map_err(|e| SchemaValidationError::new(Self::NAME, e.to_string()))
    }

    fn from_slice(raw: &[u8]) -> Result<Self, SchemaValidationError> {
        serde_json::from_slice(raw).map_err(|e| SchemaValidationError::new(Self::NAME, e.to_string()))
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Upload session status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    #[default]
    Pending,
    Processing,
    Complete,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => UPLOAD_STATUS_PENDING,
            Self::Processing => UPLOAD_STATUS_PROCESSING,
            Self::Complete => UPLOAD_STATUS_COMPLETE,
            Self::Error => UPLOAD_STATUS_ERROR,
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadStatus {
    type Err = SchemaValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UPLOAD_STATUS_PENDING => Ok(Self::Pending),
            UPLOAD_STATUS_PROCESSING => Ok(Self::Processing),
            UPLOAD_STATUS_COMPLETE => Ok(Self::Complete),
            UPLOAD_STATUS_ERROR => Ok(Self::Error),
            other => Err(SchemaValidationError::new(
                "UploadStatus",
                format!("unknown status `{other}`"),
            )),
        }
    }
}

// =============================================================================
// File metadata
// =============================================================================

/// Metadata a client reports for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    filename: String,
    /// Size in bytes
    size: u64,
    /// MIME type, not checked against the allow-list here
    #[serde(rename = "type")]
    mime_type: String,
    #[serde(with = "time::serde::rfc3339")]
    last_modified: OffsetDateTime,
}

impl Record for FileMetadata {
    const NAME: &'static str = "FileMetadata";
}

impl FileMetadata {
    pub fn new(
        filename: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        last_modified: OffsetDateTime,
    ) -> Self {
        Self {
            filename: filename.into(),
            size,
            mime_type: mime_type.into(),
            last_modified,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn last_modified(&self) -> OffsetDateTime {
        self.last_modified
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image")
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video")
    }

    /// Human readable size, e.g. "2.0 KB"
    pub fn size_human(&self) -> String {
        human_size(self.size)
    }
}

/// Format a byte count using 1024-based units
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

// =============================================================================
// Session data
// =============================================================================

/// An upload session and the files reported for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(rename = "client_ID")]
    pub client_id: String,
    /// Session date as sent by the client (not parsed)
    pub date: String,
    pub files: Vec<FileMetadata>,
    pub status: UploadStatus,
}

impl Record for SessionData {
    const NAME: &'static str = "SessionData";
}

impl SessionData {
    pub fn new(client_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            date: date.into(),
            files: Vec::new(),
            status: UploadStatus::Pending,
        }
    }

    /// Deterministic session identifier: `F({date})_{client_ID}`
    pub fn session_id(&self) -> String {
        format!("F({})_{}", self.date, self.client_id)
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(FileMetadata::size).sum()
    }

    pub fn image_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_image()).count()
    }

    pub fn video_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_video()).count()
    }
}

// =============================================================================
// Upload response
// =============================================================================

/// Response envelope returned by upload endpoints.
///
/// `data` is deliberately schemaless; handlers attach whatever diagnostic
/// payload fits the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl Record for UploadResponse {
    const NAME: &'static str = "UploadResponse";
}

impl UploadResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Add one entry to the data payload, creating it if needed
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}
