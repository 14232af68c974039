//! Upload validation routes
//!
//! Parse client-reported file and session metadata and check it against the
//! upload limits before any transfer starts. Nothing is persisted here.

use axum::{body::Bytes, Json};
use snapped_shared::{rules, FileMetadata, Record, SessionData, UploadResponse};

use crate::error::ApiResult;

/// Validate metadata for a single file
pub async fn validate_file(body: Bytes) -> ApiResult<Json<UploadResponse>> {
    let file = FileMetadata::from_slice(&body)?;
    rules::check_file(&file)?;

    tracing::debug!(
        filename = file.filename(),
        size = file.size(),
        mime_type = file.mime_type(),
        "File accepted"
    );

    Ok(Json(
        UploadResponse::ok("File accepted")
            .with_data("filename", file.filename())
            .with_data("size", file.size())
            .with_data("size_human", file.size_human())
            .with_data("type", file.mime_type()),
    ))
}

/// Validate a full session: file count, then each file
pub async fn validate_session(body: Bytes) -> ApiResult<Json<UploadResponse>> {
    let session = SessionData::from_slice(&body)?;
    rules::check_session(&session)?;

    let session_id = session.session_id();
    tracing::info!(
        session_id = %session_id,
        client_id = %session.client_id,
        file_count = session.files.len(),
        status = %session.status,
        "Session accepted"
    );

    Ok(Json(
        UploadResponse::ok("Session accepted")
            .with_data("session_id", session_id)
            .with_data("client_ID", session.client_id.as_str())
            .with_data("status", session.status.as_str())
            .with_data("file_count", session.files.len())
            .with_data("total_size", session.total_size())
            .with_data("total_size_human", snapped_shared::human_size(session.total_size()))
            .with_data("image_count", session.image_count())
            .with_data("video_count", session.video_count()),
    ))
}
