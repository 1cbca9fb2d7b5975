//! Text generation for transcript summaries and quizzes.
//!
//! Handlers talk to a [`TextGenerator`] held in application state; the
//! production implementation is [`OpenAiClient`].

mod openai;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI API key is not configured")]
    MissingApiKey,

    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI response had no content")]
    EmptyResponse,

    #[error("AI response could not be parsed: {0}")]
    Malformed(String),
}

/// A single chat-style generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the model's reply, trimmed.
    async fn generate(&self, request: GenerationRequest) -> Result<String, AiError>;
}
