use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::ai::prompts;
use crate::entity::course;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::course::*;
use crate::models::shared::normalize_optional_text;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Courses",
    operation_id = "createCourse",
    summary = "Create a course",
    description = "Creates a course owned by the caller. Media is attached afterwards through the upload route.",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseDetail),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, title = %payload.title))]
pub async fn create_course(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_course(&payload)?;

    let now = chrono::Utc::now();
    let new_course = course::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(normalize_optional_text(payload.description)),
        created_by: Set(auth_user.user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_course.insert(&state.db).await?;
    tracing::info!(course_id = model.id, "Course created");

    Ok((StatusCode::CREATED, Json(CourseDetail::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Courses",
    operation_id = "listCourses",
    summary = "List courses",
    description = "Returns every course, newest first. Media payloads are never included; `has_media` and the media metadata tell whether the stream and download routes will serve content.",
    responses(
        (status = 200, description = "Courses", body = Vec<CourseSummary>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let courses = course::Entity::find()
        .order_by_desc(course::Column::CreatedAt)
        .order_by_desc(course::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(courses.iter().map(CourseSummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Courses",
    operation_id = "getCourse",
    summary = "Get a course by ID",
    description = "Returns the course with its transcript, summary and quiz when present.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseDetail),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseDetail>, AppError> {
    let model = find_course(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/transcript",
    tag = "Courses",
    operation_id = "processTranscript",
    summary = "Store a transcript and generate study material",
    description = "Stores the transcript and generates a bullet-point summary and a three-question quiz. If either generation fails, nothing is stored. Requires ownership of the course or the `admin` role.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = TranscriptRequest,
    responses(
        (status = 200, description = "Course with generated material", body = CourseDetail),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "AI provider failed (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn process_transcript(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<TranscriptRequest>,
) -> Result<Json<CourseDetail>, AppError> {
    let model = find_course(&state.db, id).await?;
    auth_user.require_course_owner(&model)?;
    validate_transcript_request(&payload)?;

    let transcript = payload.transcript.trim();
    let (summary, quiz) = tokio::join!(
        state.ai.generate(prompts::course_summary(transcript)),
        state.ai.generate(prompts::course_quiz(transcript)),
    );
    let summary = summary?;
    let quiz = prompts::parse_quiz(&quiz?)?;
    let quiz = serde_json::to_value(&quiz)
        .map_err(|e| AppError::Internal(format!("Quiz serialization error: {e}")))?;

    // Only the transcript columns are written, so a concurrent media upload
    // is never overwritten.
    let mut active: course::ActiveModel = model.into();
    active.transcript = Set(Some(transcript.to_string()));
    active.summary = Set(Some(summary));
    active.quiz = Set(Some(quiz));
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(&state.db).await?;

    tracing::info!(course_id = id, "Transcript processed");

    Ok(Json(updated.into()))
}

pub(crate) async fn find_course<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<course::Model, AppError> {
    course::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))
}
