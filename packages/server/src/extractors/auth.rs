use axum::{extract::FromRequestParts, http::request::Parts};

use crate::entity::{course, user};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated caller, taken from the `Authorization: Bearer <token>` header.
///
/// Adding this as a handler parameter makes the route require a valid token.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == user::ROLE_ADMIN
    }

    /// Mutations of a course are reserved to its creator and admins.
    pub fn require_course_owner(&self, course: &course::Model) -> Result<(), AppError> {
        if course.created_by == self.user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims =
            jwt::verify(token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: claims.uid,
            email: claims.sub,
            role: claims.role,
        })
    }
}
