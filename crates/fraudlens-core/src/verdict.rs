//! Verdicts returned by the text-generation service, and their validation.
//!
//! The service is asked for a JSON object of the shape
//! `{"prediction": "Fraudulent" | "Not Fraudulent", "confidence": 0.0..=1.0, "reasoning": "..."}`.
//! [`PredictionVerdict::from_json`] checks every field explicitly and reports
//! the first violation as a [`VerdictError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Binary classification label, serialized with its exact wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "Fraudulent")]
    Fraudulent,
    #[serde(rename = "Not Fraudulent")]
    NotFraudulent,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Fraudulent, Label::NotFraudulent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fraudulent => "Fraudulent",
            Self::NotFraudulent => "Not Fraudulent",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }

    pub fn is_fraudulent(&self) -> bool {
        matches!(self, Self::Fraudulent)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which instruction persona produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    /// Role-plays a trained XGBoost fraud model.
    SimulatedModel,
    /// General-purpose financial assistant looking for anomalies.
    AiAssistant,
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::SimulatedModel, Persona::AiAssistant];

    /// Key used in serialized [`CombinedVerdict`]s and in logs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SimulatedModel => "simulatedModel",
            Self::AiAssistant => "aiAssistant",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SimulatedModel => "Simulated XGBoost Model",
            Self::AiAssistant => "AI Financial Assistant",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum VerdictError {
    #[error("response is not valid JSON: {0}")]
    Json(String),
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' should be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown prediction label '{0}'")]
    UnknownLabel(String),
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),
    #[error("reasoning is empty")]
    EmptyReasoning,
}

/// Structured classification from one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionVerdict {
    pub prediction: Label,
    /// Certainty in `[0.0, 1.0]`.
    pub confidence: f64,
    pub reasoning: String,
}

impl PredictionVerdict {
    /// Parse and validate raw response text.
    pub fn from_json(text: &str) -> Result<Self, VerdictError> {
        let value: Value =
            serde_json::from_str(text.trim()).map_err(|e| VerdictError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, VerdictError> {
        let obj = value.as_object().ok_or(VerdictError::NotAnObject)?;

        let prediction = match obj.get("prediction") {
            None | Some(Value::Null) => return Err(VerdictError::MissingField("prediction")),
            Some(Value::String(s)) => {
                Label::from_wire(s).ok_or_else(|| VerdictError::UnknownLabel(s.clone()))?
            }
            Some(_) => {
                return Err(VerdictError::WrongType {
                    field: "prediction",
                    expected: "string",
                });
            }
        };

        let confidence = match obj.get("confidence") {
            None | Some(Value::Null) => return Err(VerdictError::MissingField("confidence")),
            Some(Value::Number(n)) => n.as_f64().ok_or(VerdictError::WrongType {
                field: "confidence",
                expected: "number",
            })?,
            Some(_) => {
                return Err(VerdictError::WrongType {
                    field: "confidence",
                    expected: "number",
                });
            }
        };
        if !(0.0..=1.0).contains(&confidence) {
            return Err(VerdictError::ConfidenceOutOfRange(confidence));
        }

        let reasoning = match obj.get("reasoning") {
            None | Some(Value::Null) => return Err(VerdictError::MissingField("reasoning")),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => {
                return Err(VerdictError::WrongType {
                    field: "reasoning",
                    expected: "string",
                });
            }
        };
        if reasoning.is_empty() {
            return Err(VerdictError::EmptyReasoning);
        }

        Ok(Self {
            prediction,
            confidence,
            reasoning,
        })
    }
}

/// One verdict per persona, produced by a single successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedVerdict {
    pub simulated_model: PredictionVerdict,
    pub ai_assistant: PredictionVerdict,
}

impl CombinedVerdict {
    pub fn get(&self, persona: Persona) -> &PredictionVerdict {
        match persona {
            Persona::SimulatedModel => &self.simulated_model,
            Persona::AiAssistant => &self.ai_assistant,
        }
    }

    /// Verdicts in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (Persona, &PredictionVerdict)> {
        Persona::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Whether both personas reached the same label.
    pub fn agrees(&self) -> bool {
        self.simulated_model.prediction == self.ai_assistant.prediction
    }
}
