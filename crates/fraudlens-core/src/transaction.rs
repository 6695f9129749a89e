//! Transaction input as entered on the form, plus the two demonstration presets.
//!
//! All values are kept as the text the user typed. Nothing here parses them as
//! numbers: the prompt sent to the model interpolates them verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    V10,
    V12,
    V14,
    V17,
    Amount,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 5] = [Field::V10, Field::V12, Field::V14, Field::V17, Field::Amount];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V10 => "v10",
            Self::V12 => "v12",
            Self::V14 => "v14",
            Self::V17 => "v17",
            Self::Amount => "amount",
        }
    }

    /// Label used in prompts (`V10`, ..., `Amount`).
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Self::V10 => "V10",
            Self::V12 => "V12",
            Self::V14 => "V14",
            Self::V17 => "V17",
            Self::Amount => "Amount",
        }
    }

    /// PCA-transformed feature whose meaning is not disclosed.
    pub fn is_anonymized(&self) -> bool {
        !matches!(self, Self::Amount)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field '{0}' (expected one of v10, v12, v14, v17, amount)")]
pub struct FieldParseError(pub String);

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FieldParseError(wanted.to_string()))
    }
}

/// The five user-entered values submitted for analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub v10: String,
    pub v12: String,
    pub v14: String,
    pub v17: String,
    pub amount: String,
}

impl TransactionRequest {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::V10 => &self.v10,
            Field::V12 => &self.v12,
            Field::V14 => &self.v14,
            Field::V17 => &self.v17,
            Field::Amount => &self.amount,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::V10 => &mut self.v10,
            Field::V12 => &mut self.v12,
            Field::V14 => &mut self.v14,
            Field::V17 => &mut self.v17,
            Field::Amount => &mut self.amount,
        };
        *slot = value.into();
    }

    /// Fields that are empty or whitespace only, in display order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Built-in example transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Normal,
    Fraud,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Normal, Preset::Fraud];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fraud => "fraud",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Normal => "Normal Case",
            Self::Fraud => "Fraudulent Case",
        }
    }

    pub fn request(&self) -> TransactionRequest {
        let (v10, v12, v14, v17, amount) = match self {
            Self::Normal => ("-0.255425", "-0.617801", "-0.311169", "0.207971", "1.98"),
            Self::Fraud => ("-2.770083", "-2.756053", "-4.609969", "-6.665951", "1.00"),
        };
        TransactionRequest {
            v10: v10.into(),
            v12: v12.into(),
            v14: v14.into(),
            v17: v17.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown preset '{0}' (expected 'normal' or 'fraud')")]
pub struct PresetParseError(pub String);

impl FromStr for Preset {
    type Err = PresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "non-fraud" | "legit" => Ok(Self::Normal),
            "fraud" | "fraudulent" => Ok(Self::Fraud),
            other => Err(PresetParseError(other.to_string())),
        }
    }
}
