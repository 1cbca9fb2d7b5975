use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use common::MediaPolicy;
use tracing::instrument;

use super::course::find_course;
use crate::config::AppConfig;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::media::{Disposition, attach_media, media_response, read_upload};
use crate::models::shared::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{id}/upload",
    tag = "Course Media",
    operation_id = "uploadCourseMedia",
    summary = "Attach media to a course",
    description = "Uploads an image, video or audio file as the course media, replacing any previous media. The file is sent as the `file` field of a multipart form and must not exceed the configured ceiling (15 MB by default). Also served at `POST /api/uploads/courses/{id}`. Requires ownership of the course or the `admin` role.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body(content_type = "multipart/form-data", description = "`file` field: image (jpg, jpeg, png, gif), video (mp4, mov) or audio (mp3, wav)"),
    responses(
        (status = 200, description = "Media stored", body = MessageResponse),
        (status = 400, description = "Missing file, unsupported type or file too large (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(id, user_id = auth_user.user_id))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let course = find_course(&state.db, id).await?;
    auth_user.require_course_owner(&course)?;

    let policy = MediaPolicy::new(state.config.storage.max_media_bytes);
    let upload = read_upload(multipart, &policy).await?;
    let info = attach_media(state.media.as_ref(), &policy, id, upload).await?;

    tracing::info!(
        course_id = id,
        content_type = %info.content_type,
        size = info.size,
        "Course media stored"
    );

    Ok(Json(MessageResponse::new("Media uploaded to course")))
}

#[utoipa::path(
    get,
    path = "/{id}/stream",
    tag = "Course Media",
    operation_id = "streamCourseMedia",
    summary = "Stream course media inline",
    description = "Returns the stored media with its original content type and `Content-Disposition: inline`. Supports `If-None-Match` against the returned `ETag`.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Media bytes", content_type = "application/octet-stream"),
        (status = 304, description = "Not modified"),
        (status = 404, description = "Course or media not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(id))]
pub async fn stream_media(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    media_response(state.media.as_ref(), id, Disposition::Inline, &headers).await
}

#[utoipa::path(
    get,
    path = "/{id}/download",
    tag = "Course Media",
    operation_id = "downloadCourseMedia",
    summary = "Download course media",
    description = "Returns the stored media with `Content-Disposition: attachment` carrying the original filename.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Media bytes", content_type = "application/octet-stream"),
        (status = 304, description = "Not modified"),
        (status = 404, description = "Course or media not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(id))]
pub async fn download_media(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    media_response(state.media.as_ref(), id, Disposition::Attachment, &headers).await
}

/// Body limit layer for the upload routes.
pub fn media_upload_body_limit(config: &AppConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.storage.max_request_bytes)
}
