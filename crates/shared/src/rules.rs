//! Upload rule enforcement
//!
//! The record types in [`crate::types`] only check shape. These functions
//! apply the size, type and count limits from [`crate::constants`] and are
//! called by upload-handling code before it accepts a file or session.
//!
//! The validation routes in the API crate use [`check_file`] and
//! [`check_session`]. [`check_can_add`] serves the incremental add-file
//! path of the upload service, which lives outside this workspace.

use crate::constants::{is_allowed_file_type, MAX_FILES_PER_SESSION, MAX_FILE_SIZE};
use crate::error::UploadRuleViolation;
use crate::types::{FileMetadata, SessionData};

/// Check a single file against the size limit, then the type allow-list
pub fn check_file(file: &FileMetadata) -> Result<(), UploadRuleViolation> {
    if file.size() > MAX_FILE_SIZE {
        return Err(UploadRuleViolation::FileTooLarge {
            filename: file.filename().to_string(),
            size: file.size(),
        });
    }

    if !is_allowed_file_type(file.mime_type()) {
        return Err(UploadRuleViolation::InvalidFileType {
            filename: file.filename().to_string(),
            mime_type: file.mime_type().to_string(),
        });
    }

    Ok(())
}

/// Check a whole session: file count first, then every file in order
pub fn check_session(session: &SessionData) -> Result<(), UploadRuleViolation> {
    if session.files.len() > MAX_FILES_PER_SESSION {
        return Err(UploadRuleViolation::SessionFull {
            file_count: session.files.len(),
        });
    }

    session.files.iter().try_for_each(check_file)
}

/// Check whether `file` may be appended to `session`
pub fn check_can_add(session: &SessionData, file: &FileMetadata) -> Result<(), UploadRuleViolation> {
    if session.files.len() >= MAX_FILES_PER_SESSION {
        return Err(UploadRuleViolation::SessionFull {
            file_count: session.files.len(),
        });
    }

    check_file(file)
}
