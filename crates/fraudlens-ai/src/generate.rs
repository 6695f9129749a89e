//! The seam between the analyzer and whatever produces text.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response contained no text")]
    EmptyResponse,
}

/// One structured-output generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    /// JSON schema the response text must follow.
    pub response_schema: Value,
    pub temperature: f32,
}

/// Something that turns a [`GenerateRequest`] into response text.
///
/// Implemented by [`GeminiClient`](crate::GeminiClient); tests substitute
/// in-memory fakes.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String, InferenceError>> + Send;
}
