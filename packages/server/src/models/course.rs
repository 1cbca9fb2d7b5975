use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::course;
use crate::error::AppError;
use crate::media::MediaInfo;

use super::shared::{require_text, validate_title};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCourseRequest {
    /// Course title (1-256 characters after trimming).
    #[schema(example = "Intro to Rust")]
    pub title: String,
    #[schema(example = "Ownership, borrowing and lifetimes in six lessons.")]
    pub description: Option<String>,
}

pub fn validate_create_course(payload: &CreateCourseRequest) -> Result<(), AppError> {
    validate_title(&payload.title)
}

/// Transcript submitted for AI summarization and quiz generation.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct TranscriptRequest {
    #[schema(example = "Welcome to lesson one. Today we talk about ownership...")]
    pub transcript: String,
}

pub fn validate_transcript_request(payload: &TranscriptRequest) -> Result<(), AppError> {
    require_text(&payload.transcript, "Transcript")
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuizQuestion {
    #[schema(example = "What does the borrow checker enforce?")]
    pub question: String,
    #[schema(example = json!(["Aliasing XOR mutation", "Garbage collection", "Type inference", "Macros"]))]
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    #[schema(example = "Aliasing XOR mutation")]
    pub correct_answer: String,
}

/// Metadata of the media attached to a course. The payload itself is only
/// served by the stream and download routes.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CourseMediaResponse {
    #[schema(example = "video/mp4")]
    pub content_type: String,
    #[schema(example = "lesson-1.mp4")]
    pub filename: String,
    /// Payload size in bytes.
    #[schema(example = 5242880)]
    pub size: i64,
}

impl From<MediaInfo> for CourseMediaResponse {
    fn from(info: MediaInfo) -> Self {
        Self {
            content_type: info.content_type,
            filename: info.filename,
            size: info.size,
        }
    }
}

/// Course as shown in listings.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CourseSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Intro to Rust")]
    pub title: String,
    pub description: Option<String>,
    /// ID of the user who created the course.
    #[schema(example = 42)]
    pub created_by: i32,
    pub has_media: bool,
    pub media: Option<CourseMediaResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&course::Model> for CourseSummary {
    fn from(model: &course::Model) -> Self {
        let media = MediaInfo::of_course(model).map(CourseMediaResponse::from);
        Self {
            id: model.id,
            title: model.title.clone(),
            description: model.description.clone(),
            created_by: model.created_by,
            has_media: media.is_some(),
            media,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Full course view, including AI-generated material.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseSummary,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub quiz: Option<Vec<QuizQuestion>>,
}

impl From<course::Model> for CourseDetail {
    fn from(model: course::Model) -> Self {
        let quiz = model.quiz.clone().and_then(|value| {
            serde_json::from_value::<Vec<QuizQuestion>>(value)
                .map_err(|e| tracing::warn!(course_id = model.id, "Stored quiz is malformed: {e}"))
                .ok()
        });
        Self {
            course: CourseSummary::from(&model),
            transcript: model.transcript,
            summary: model.summary,
            quiz,
        }
    }
}
