//! Dual-persona transaction analysis.
//!
//! One submission becomes two generation calls, one per [`Persona`], issued
//! together and joined. Either branch failing fails the whole analysis; the
//! cause is logged and the caller only sees [`AnalysisError`]'s generic
//! message.

use fraudlens_core::{
    CombinedVerdict, Persona, PredictionVerdict, TransactionRequest, VerdictError,
};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::generate::{InferenceError, TextGenerator};
use crate::join::{JoinOutcome, join_both};
use crate::prompts::persona_request;

/// Why a single persona's prediction failed.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("inference: {0}")]
    Inference(#[from] InferenceError),
    #[error("invalid verdict: {0}")]
    Verdict(#[from] VerdictError),
}

/// User-facing failure of [`Analyzer::analyze`].
///
/// `Display` is deliberately fixed; the persona and cause are kept for logs.
#[derive(Error, Debug)]
#[error("Failed to get a valid prediction from the AI models.")]
pub struct AnalysisError {
    pub persona: Persona,
    #[source]
    pub cause: PredictionError,
}

/// Runs both personas against an injected [`TextGenerator`].
pub struct Analyzer<G> {
    generator: G,
}

impl<G: TextGenerator> Analyzer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask one persona for a verdict and validate it.
    pub async fn predict(
        &self,
        request: &TransactionRequest,
        persona: Persona,
    ) -> Result<PredictionVerdict, PredictionError> {
        debug!(persona = %persona, "requesting prediction");
        let text = self
            .generator
            .generate(&persona_request(persona, request))
            .await?;
        let verdict = PredictionVerdict::from_json(&text)?;
        debug!(
            persona = %persona,
            prediction = %verdict.prediction,
            confidence = verdict.confidence,
            "prediction validated"
        );
        Ok(verdict)
    }

    async fn predict_as(
        &self,
        request: &TransactionRequest,
        persona: Persona,
    ) -> Result<PredictionVerdict, AnalysisError> {
        self.predict(request, persona)
            .await
            .map_err(|cause| AnalysisError { persona, cause })
    }

    /// Fan out to both personas and merge; no partial results.
    pub async fn analyze(
        &self,
        request: &TransactionRequest,
    ) -> Result<CombinedVerdict, AnalysisError> {
        let outcome = join_both(
            self.predict_as(request, Persona::SimulatedModel),
            self.predict_as(request, Persona::AiAssistant),
        )
        .await;

        match outcome {
            JoinOutcome::Both(simulated_model, ai_assistant) => {
                let combined = CombinedVerdict {
                    simulated_model,
                    ai_assistant,
                };
                info!(
                    simulated_model = %combined.simulated_model.prediction,
                    ai_assistant = %combined.ai_assistant.prediction,
                    agree = combined.agrees(),
                    "analysis complete"
                );
                Ok(combined)
            }
            JoinOutcome::Failed(err) => {
                error!(persona = %err.persona, error = %err.cause, "error analyzing transaction");
                Err(err)
            }
        }
    }
}
