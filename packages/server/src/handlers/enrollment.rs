use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use super::course::find_course;
use crate::entity::{course, enrollment};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::enrollment::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{id}/enroll",
    tag = "Enrollment",
    operation_id = "enrollInCourse",
    summary = "Enroll in a course",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already enrolled (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id, user_id = auth_user.user_id))]
pub async fn enroll(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_course(&state.db, id).await?;

    let now = chrono::Utc::now();
    let new_enrollment = enrollment::ActiveModel {
        user_id: Set(auth_user.user_id),
        course_id: Set(id),
        progress: Set(0),
        next_lesson: Set(enrollment::DEFAULT_NEXT_LESSON.to_string()),
        completed: Set(false),
        total_hours: Set(0.0),
        certificate: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_enrollment
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Already enrolled in this course".into())
            }
            _ => AppError::from(e),
        })?;

    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}/progress",
    tag = "Enrollment",
    operation_id = "updateCourseProgress",
    summary = "Record progress in an enrolled course",
    description = "Partially updates the caller's enrollment. Setting progress to 100 marks the course completed and issues a certificate; `hours_spent` is added to the running total.",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not enrolled in this course (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, user_id = auth_user.user_id))]
pub async fn update_progress(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProgressRequest>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    validate_update_progress(&payload)?;

    let existing = enrollment::Entity::find()
        .filter(enrollment::Column::UserId.eq(auth_user.user_id))
        .filter(enrollment::Column::CourseId.eq(id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".into()))?;

    let certified = existing.certificate;
    let total_hours = existing.total_hours;
    let mut active: enrollment::ActiveModel = existing.into();

    if let Some(progress) = payload.progress {
        let completed = progress == 100;
        active.progress = Set(progress);
        active.completed = Set(completed);
        // A certificate, once issued, is kept.
        active.certificate = Set(certified || completed);
    }
    if let Some(next_lesson) = payload.next_lesson {
        active.next_lesson = Set(next_lesson.trim().to_string());
    }
    if let Some(hours) = payload.hours_spent {
        active.total_hours = Set(total_hours + hours);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/enrolled-courses",
    tag = "Dashboard",
    operation_id = "listEnrolledCourses",
    summary = "List the caller's enrolled courses",
    description = "Most recently active enrollment first.",
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<EnrolledCourse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn enrolled_courses(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrolledCourse>>, AppError> {
    let rows = enrollment::Entity::find()
        .select_only()
        .column(enrollment::Column::CourseId)
        .column(course::Column::Title)
        .column(enrollment::Column::Progress)
        .column(enrollment::Column::NextLesson)
        .inner_join(course::Entity)
        .filter(enrollment::Column::UserId.eq(auth_user.user_id))
        .order_by_desc(enrollment::Column::UpdatedAt)
        .order_by_desc(enrollment::Column::Id)
        .into_model::<EnrolledCourse>()
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Dashboard",
    operation_id = "getDashboardStats",
    summary = "Aggregate learning statistics for the caller",
    responses(
        (status = 200, description = "Statistics", body = DashboardStats),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn dashboard_stats(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let enrollments = enrollment::Entity::find()
        .filter(enrollment::Column::UserId.eq(auth_user.user_id))
        .all(&state.db)
        .await?;

    Ok(Json(DashboardStats::from_enrollments(&enrollments)))
}
