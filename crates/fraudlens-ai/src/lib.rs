//! AI layer: Gemini client, persona prompts, and dual-persona analysis.

mod analyzer;
mod gemini;
mod generate;
pub mod join;
pub mod prompts;

pub use analyzer::{AnalysisError, Analyzer, PredictionError};
pub use gemini::{ConfigError, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use generate::{GenerateRequest, InferenceError, TextGenerator};
pub use join::{JoinOutcome, join_both};
