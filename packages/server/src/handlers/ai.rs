use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::ai::prompts;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::ai::*;
use crate::models::shared::require_text;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/summary",
    tag = "AI",
    operation_id = "summarizeTranscript",
    summary = "Summarize a transcript",
    description = "Returns a free-form summary generated by the configured model. Nothing is stored.",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Generated summary", body = SummaryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "AI provider failed (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, len = payload.transcript.len()))]
pub async fn summary(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    require_text(&payload.transcript, "Transcript")?;

    let summary = state
        .ai
        .generate(prompts::transcript_summary(&payload.transcript))
        .await?;

    Ok(Json(SummaryResponse { summary }))
}

#[utoipa::path(
    post,
    path = "/quiz",
    tag = "AI",
    operation_id = "generateQuiz",
    summary = "Generate quiz text from a prompt",
    description = "Forwards the prompt to the configured model and returns the raw reply. Nothing is stored.",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Generated text", body = QuizResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "AI provider failed (UPSTREAM_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn quiz(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    require_text(&payload.prompt, "Prompt")?;

    let quiz = state.ai.generate(prompts::free_prompt(&payload.prompt)).await?;

    Ok(Json(QuizResponse { quiz }))
}
