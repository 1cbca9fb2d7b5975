use axum::extract::Multipart;
use common::{MediaError, MediaPolicy, UploadRequest};

use super::store::{CourseMediaStore, MediaInfo};
use crate::error::AppError;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Buffer the `file` field of a multipart body.
///
/// Reading stops keeping bytes once the running total passes the policy
/// ceiling; the rest of the body is drained so the client still gets the
/// validation error instead of a reset connection.
pub async fn read_upload(
    mut multipart: Multipart,
    policy: &MediaPolicy,
) -> Result<UploadRequest, AppError> {
    let mut upload: Option<UploadRequest> = None;
    let mut oversized: Option<MediaError> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) || upload.is_some() {
            continue; // Ignore unknown fields and extra files.
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let mut bytes = Vec::new();
        let mut total: u64 = 0;

        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                // Body limit hit while draining an already rejected file.
                Err(_) if oversized.is_some() => break,
                Err(e) => return Err(AppError::Validation(format!("Upload read error: {e}"))),
            };
            total += chunk.len() as u64;
            if oversized.is_none()
                && let Err(e) = policy.check_size(total)
            {
                oversized = Some(e);
                bytes = Vec::new();
            }
            if oversized.is_none() {
                bytes.extend_from_slice(&chunk);
            }
        }

        if oversized.is_some() {
            break;
        }

        upload = Some(UploadRequest {
            bytes,
            filename,
            content_type,
        });
    }

    if let Some(err) = oversized {
        return Err(err.into());
    }
    upload.ok_or_else(|| MediaError::MissingFile.into())
}

/// Validate an upload and, only if it passes, hand it to the store.
pub async fn attach_media(
    store: &dyn CourseMediaStore,
    policy: &MediaPolicy,
    course_id: i32,
    upload: UploadRequest,
) -> Result<MediaInfo, AppError> {
    let kind = policy.validate(&upload)?;
    tracing::debug!(
        course_id,
        %kind,
        size = upload.len(),
        filename = %upload.filename,
        "Upload accepted"
    );
    store.write(course_id, upload).await
}
