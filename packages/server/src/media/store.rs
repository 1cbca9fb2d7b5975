use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::UploadRequest;
use common::storage::{BlobStore, BoxReader, ContentHash};
use sea_orm::prelude::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};

use crate::entity::course;
use crate::error::AppError;

/// Metadata of a course's media, complete by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub content_hash: String,
    pub content_type: String,
    pub filename: String,
    pub size: i64,
}

impl MediaInfo {
    /// Assemble from the nullable media columns. Any missing column means the
    /// course has no media.
    pub fn from_columns(
        hash: Option<String>,
        content_type: Option<String>,
        filename: Option<String>,
        size: Option<i64>,
    ) -> Option<Self> {
        Some(Self {
            content_hash: hash?,
            content_type: content_type?,
            filename: filename?,
            size: size?,
        })
    }

    /// Validator covering everything a response derives from the media, so
    /// re-uploading the same bytes under a new name or type changes it.
    pub fn etag(&self) -> String {
        let mut material = Vec::with_capacity(
            self.content_hash.len() + self.content_type.len() + self.filename.len() + 2,
        );
        material.extend_from_slice(self.content_hash.as_bytes());
        material.push(0);
        material.extend_from_slice(self.content_type.as_bytes());
        material.push(0);
        material.extend_from_slice(self.filename.as_bytes());
        format!("\"{}\"", ContentHash::compute(&material).to_hex())
    }

    pub fn of_course(model: &course::Model) -> Option<Self> {
        Self::from_columns(
            model.media_hash.clone(),
            model.media_content_type.clone(),
            model.media_filename.clone(),
            model.media_size,
        )
    }
}

/// Storage of the single media attachment a course may own.
#[async_trait]
pub trait CourseMediaStore: Send + Sync {
    /// Replace the course's media wholesale. The upload must already have
    /// passed validation.
    async fn write(&self, course_id: i32, upload: UploadRequest) -> Result<MediaInfo, AppError>;

    /// Look up the course's media metadata. Missing course and missing media
    /// are the same `NotFound`.
    async fn info(&self, course_id: i32) -> Result<MediaInfo, AppError>;

    /// Open the payload described by `info` for streaming.
    async fn open(&self, info: &MediaInfo) -> Result<BoxReader, AppError>;
}

/// Payload in a content-addressed [`BlobStore`], metadata on the course row.
pub struct DbCourseMediaStore {
    db: DatabaseConnection,
    blobs: Arc<dyn BlobStore>,
}

impl DbCourseMediaStore {
    pub fn new(db: DatabaseConnection, blobs: Arc<dyn BlobStore>) -> Self {
        Self { db, blobs }
    }
}

#[derive(FromQueryResult)]
struct MediaColumns {
    media_hash: Option<String>,
    media_content_type: Option<String>,
    media_filename: Option<String>,
    media_size: Option<i64>,
}

fn media_not_found() -> AppError {
    AppError::NotFound("Media not found".into())
}

#[async_trait]
impl CourseMediaStore for DbCourseMediaStore {
    async fn write(&self, course_id: i32, upload: UploadRequest) -> Result<MediaInfo, AppError> {
        // Blob first: the row never references bytes that are not stored yet.
        let hash = self.blobs.put(&upload.bytes).await?;

        let info = MediaInfo {
            content_hash: hash.to_hex(),
            content_type: upload.content_type,
            filename: upload.filename,
            size: i64::try_from(upload.bytes.len()).unwrap_or(i64::MAX),
        };

        let result = course::Entity::update_many()
            .col_expr(course::Column::MediaHash, Expr::value(info.content_hash.clone()))
            .col_expr(
                course::Column::MediaContentType,
                Expr::value(info.content_type.clone()),
            )
            .col_expr(course::Column::MediaFilename, Expr::value(info.filename.clone()))
            .col_expr(course::Column::MediaSize, Expr::value(info.size))
            .col_expr(course::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(course::Column::Id.eq(course_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Course not found".into()));
        }

        tracing::info!(course_id, hash = %info.content_hash, size = info.size, "Course media replaced");
        Ok(info)
    }

    async fn info(&self, course_id: i32) -> Result<MediaInfo, AppError> {
        let columns = course::Entity::find_by_id(course_id)
            .select_only()
            .column(course::Column::MediaHash)
            .column(course::Column::MediaContentType)
            .column(course::Column::MediaFilename)
            .column(course::Column::MediaSize)
            .into_model::<MediaColumns>()
            .one(&self.db)
            .await?
            .ok_or_else(media_not_found)?;

        MediaInfo::from_columns(
            columns.media_hash,
            columns.media_content_type,
            columns.media_filename,
            columns.media_size,
        )
        .ok_or_else(media_not_found)
    }

    async fn open(&self, info: &MediaInfo) -> Result<BoxReader, AppError> {
        let hash = ContentHash::from_hex(&info.content_hash)?;
        Ok(self.blobs.get_stream(&hash).await?)
    }
}
