use axum::body::Body;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use super::store::CourseMediaStore;
use crate::error::AppError;

const MEDIA_CACHE_CONTROL: &str = "private, no-cache";

/// How the client should present the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Render in the browser (video playback).
    Inline,
    /// Save to disk.
    Attachment,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Attachment => "attachment",
        }
    }
}

/// Full-body response for a course's media, honouring `If-None-Match`.
///
/// Clients must revalidate on every request since the course's media can be
/// replaced under the same URL. The payload is opened only when a body will
/// be sent.
pub async fn media_response(
    store: &dyn CourseMediaStore,
    course_id: i32,
    disposition: Disposition,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let info = store.info(course_id).await?;

    let etag_value = info.etag();
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .header(header::ETAG, &etag_value)
            .header(header::CACHE_CONTROL, MEDIA_CACHE_CONTROL)
            .body(Body::empty())
            .map_err(|e| AppError::Internal(format!("Failed to build media response: {e}")));
    }

    let body = store.open(&info).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &info.content_type)
        .header(header::CONTENT_LENGTH, info.size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(disposition, &info.filename),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, MEDIA_CACHE_CONTROL)
        .body(Body::from_stream(ReaderStream::new(body)))
        .map_err(|e| AppError::Internal(format!("Failed to build media response: {e}")))
}

/// `Content-Disposition` carrying the stored filename.
///
/// `filename` gets an ASCII-only fallback; `filename*` (RFC 5987) carries
/// the original name byte for byte.
pub fn content_disposition_value(disposition: Disposition, filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '"' | '\\'))
        .collect();
    let ascii_name = match ascii_safe.trim() {
        "" => "download",
        name => name,
    };

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!(
        "{}; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}",
        disposition.as_str()
    )
}
