use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SummaryRequest {
    #[schema(example = "Welcome to lesson one. Today we talk about ownership...")]
    pub transcript: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SummaryResponse {
    #[schema(example = "The lesson introduces ownership...")]
    pub summary: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct QuizRequest {
    /// Free-form instruction forwarded to the model.
    #[schema(example = "Write three questions about Rust ownership.")]
    pub prompt: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct QuizResponse {
    /// Generated text, unparsed.
    pub quiz: String,
}
