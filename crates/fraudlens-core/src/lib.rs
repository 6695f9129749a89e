pub mod form;
pub mod transaction;
pub mod verdict;

pub use form::{FormError, FormState, PredictionStatus, Submission};
pub use transaction::{Field, FieldParseError, Preset, PresetParseError, TransactionRequest};
pub use verdict::{CombinedVerdict, Label, Persona, PredictionVerdict, VerdictError};
