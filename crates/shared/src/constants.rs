//! Upload constants: status codes, file type allow-list, limits and error messages.

// Upload status codes
pub const UPLOAD_STATUS_PENDING: &str = "pending";
pub const UPLOAD_STATUS_PROCESSING: &str = "processing";
pub const UPLOAD_STATUS_COMPLETE: &str = "complete";
pub const UPLOAD_STATUS_ERROR: &str = "error";

/// MIME types accepted for upload
pub const ALLOWED_FILE_TYPES: [&str; 4] = [
    "image/jpeg",
    "image/png",
    "application/pdf",
    "text/plain",
];

/// Maximum file size in bytes (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of files per upload session
pub const MAX_FILES_PER_SESSION: usize = 100;

// Error messages
pub const ERROR_FILE_TOO_LARGE: &str = "File exceeds maximum size limit";
pub const ERROR_INVALID_FILE_TYPE: &str = "File type not allowed";
pub const ERROR_SESSION_FULL: &str = "Session has reached maximum file limit";

/// Check a MIME type against [`ALLOWED_FILE_TYPES`] (exact match)
pub fn is_allowed_file_type(mime_type: &str) -> bool {
    ALLOWED_FILE_TYPES.contains(&mime_type)
}
