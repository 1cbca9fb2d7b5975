//! Prompt construction and reply parsing for the course AI features.

use serde::Deserialize;

use super::{AiError, GenerationRequest};
use crate::models::course::QuizQuestion;

/// Number of questions requested for a course quiz.
pub const QUIZ_QUESTIONS: usize = 3;

/// Free-form summary of a transcript, as used by `POST /ai/summary`.
pub fn transcript_summary(transcript: &str) -> GenerationRequest {
    GenerationRequest {
        system: Some("You are a helpful assistant.".into()),
        prompt: format!("Summarize the following transcript:\n\n{transcript}"),
        temperature: None,
        max_tokens: Some(1024),
    }
}

/// Caller-supplied prompt, as used by `POST /ai/quiz`.
pub fn free_prompt(prompt: &str) -> GenerationRequest {
    GenerationRequest {
        system: Some("You are a helpful assistant.".into()),
        prompt: prompt.to_string(),
        temperature: None,
        max_tokens: Some(1024),
    }
}

/// Bullet-point summary stored on a course.
pub fn course_summary(transcript: &str) -> GenerationRequest {
    GenerationRequest {
        system: None,
        prompt: format!("Summarize this course transcript into key bullet points:\n\n{transcript}"),
        temperature: Some(0.5),
        max_tokens: None,
    }
}

/// Multiple-choice quiz stored on a course. The reply is read by [`parse_quiz`].
pub fn course_quiz(transcript: &str) -> GenerationRequest {
    let prompt = format!(
        r#"Create {QUIZ_QUESTIONS} multiple-choice questions based on this transcript:

"{transcript}"

Respond ONLY with valid JSON in this exact structure:
{{
  "questions": [
    {{
      "question": "string",
      "options": ["A", "B", "C", "D"],
      "correctAnswer": "string"
    }}
  ]
}}"#
    );
    GenerationRequest {
        system: None,
        prompt,
        temperature: Some(0.6),
        max_tokens: None,
    }
}

#[derive(Deserialize)]
struct QuizEnvelope {
    questions: Vec<QuizQuestion>,
}

/// Decode a quiz reply. Models often wrap JSON in a fenced code block, so
/// one is stripped when present.
pub fn parse_quiz(reply: &str) -> Result<Vec<QuizQuestion>, AiError> {
    let body = strip_code_fence(reply);
    let envelope: QuizEnvelope =
        serde_json::from_str(body).map_err(|e| AiError::Malformed(e.to_string()))?;
    if envelope.questions.is_empty() {
        return Err(AiError::Malformed("quiz has no questions".into()));
    }
    Ok(envelope.questions)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (`json`, `JSON`, ...) on the opening line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
