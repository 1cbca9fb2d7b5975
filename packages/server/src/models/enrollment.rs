use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entity::enrollment;
use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct EnrollmentResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = 1)]
    pub course_id: i32,
    #[schema(example = 42)]
    pub user_id: i32,
    /// Percentage, 0-100.
    #[schema(example = 40)]
    pub progress: i32,
    #[schema(example = "Lesson 3: Borrowing")]
    pub next_lesson: String,
    pub completed: bool,
    #[schema(example = 2.5)]
    pub total_hours: f64,
    pub certificate: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<enrollment::Model> for EnrollmentResponse {
    fn from(model: enrollment::Model) -> Self {
        Self {
            id: model.id,
            course_id: model.course_id,
            user_id: model.user_id,
            progress: model.progress,
            next_lesson: model.next_lesson,
            completed: model.completed,
            total_hours: model.total_hours,
            certificate: model.certificate,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Partial progress update; absent fields are left untouched.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateProgressRequest {
    #[schema(example = 60)]
    pub progress: Option<i32>,
    #[schema(example = "Lesson 4: Lifetimes")]
    pub next_lesson: Option<String>,
    /// Hours to add to the running total.
    #[schema(example = 1.5)]
    pub hours_spent: Option<f64>,
}

pub fn validate_update_progress(payload: &UpdateProgressRequest) -> Result<(), AppError> {
    if let Some(progress) = payload.progress
        && !(0..=100).contains(&progress)
    {
        return Err(AppError::Validation("Progress must be 0-100".into()));
    }
    if let Some(next) = &payload.next_lesson
        && (next.trim().is_empty() || next.chars().count() > 256)
    {
        return Err(AppError::Validation(
            "Next lesson must be 1-256 characters".into(),
        ));
    }
    if let Some(hours) = payload.hours_spent
        && !(hours.is_finite() && hours >= 0.0)
    {
        return Err(AppError::Validation(
            "Hours spent must be a non-negative number".into(),
        ));
    }
    Ok(())
}

/// Row of the dashboard's enrolled-course list.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct EnrolledCourse {
    #[schema(example = 1)]
    pub course_id: i32,
    #[schema(example = "Intro to Rust")]
    pub title: String,
    #[schema(example = 40)]
    pub progress: i32,
    #[schema(example = "Lesson 3: Borrowing")]
    pub next_lesson: String,
}

/// Aggregate learning statistics for the caller.
#[derive(Serialize, Debug, PartialEq, utoipa::ToSchema)]
pub struct DashboardStats {
    #[schema(example = 2)]
    pub courses_completed: u64,
    #[schema(example = 3)]
    pub courses_in_progress: u64,
    #[schema(example = 12.5)]
    pub total_hours: f64,
    #[schema(example = 1)]
    pub certificates: u64,
}

impl DashboardStats {
    pub fn from_enrollments(enrollments: &[enrollment::Model]) -> Self {
        let courses_completed = enrollments.iter().filter(|e| e.completed).count() as u64;
        Self {
            courses_completed,
            courses_in_progress: enrollments.len() as u64 - courses_completed,
            total_hours: enrollments.iter().map(|e| e.total_hours).sum(),
            certificates: enrollments.iter().filter(|e| e.certificate).count() as u64,
        }
    }
}
