//! Form state and the prediction status machine.
//!
//! ```text
//! Idle ──submit──▶ Loading ──▶ Success(verdict) | Error(message)
//!   ▲                 │                │
//!   └──reset/preset───┴────────────────┘
//! ```
//!
//! A submission hands out a [`Submission`] ticket. Only the completion for the
//! current ticket is applied; a reset or preset load while a request is in
//! flight returns the form to `Idle` and the late completion is dropped.

use thiserror::Error;
use tracing::debug;

use crate::transaction::{Field, Preset, TransactionRequest};
use crate::verdict::CombinedVerdict;

/// Visible state of the results panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PredictionStatus {
    #[default]
    Idle,
    Loading,
    Success(CombinedVerdict),
    Error(String),
}

impl PredictionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("required fields are empty: {}", join_fields(.0))]
    MissingFields(Vec<Field>),
    #[error("an analysis is already in progress")]
    InFlight,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A request accepted by [`FormState::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub request: TransactionRequest,
}

/// Field values plus the status of the latest submission.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: TransactionRequest,
    status: PredictionStatus,
    next_ticket: u64,
    in_flight: Option<u64>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &TransactionRequest {
        &self.fields
    }

    pub fn status(&self) -> &PredictionStatus {
        &self.status
    }

    /// Replace one field's text. Leaves the status untouched.
    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Clear every field and any result or error.
    pub fn reset(&mut self) {
        self.fields = TransactionRequest::default();
        self.go_idle();
    }

    /// Overwrite all fields with a preset and clear any result or error.
    pub fn load_preset(&mut self, preset: Preset) {
        self.fields = preset.request();
        self.go_idle();
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        self.fields.missing_fields()
    }

    /// Validate the form and move to `Loading`.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.status.is_loading() {
            return Err(FormError::InFlight);
        }
        let missing = self.fields.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.status = PredictionStatus::Loading;
        debug!(ticket, "submission started");

        Ok(Submission {
            ticket,
            request: self.fields.clone(),
        })
    }

    /// Apply a successful analysis. Returns `false` if the ticket is stale.
    pub fn complete_success(&mut self, ticket: u64, verdict: CombinedVerdict) -> bool {
        self.complete(ticket, PredictionStatus::Success(verdict))
    }

    /// Apply a failed analysis. Returns `false` if the ticket is stale.
    pub fn complete_error(&mut self, ticket: u64, message: impl Into<String>) -> bool {
        self.complete(ticket, PredictionStatus::Error(message.into()))
    }

    fn complete(&mut self, ticket: u64, status: PredictionStatus) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(ticket, current = ?self.in_flight, "ignoring stale completion");
            return false;
        }
        self.in_flight = None;
        debug!(ticket, status = status.name(), "submission finished");
        self.status = status;
        true
    }

    fn go_idle(&mut self) {
        self.in_flight = None;
        self.status = PredictionStatus::Idle;
    }
}
