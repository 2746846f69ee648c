use thiserror::Error;

use crate::ephemeris::ParsingError;

/// Raised by a section setter when the proposed value
/// breaks a structural constraint. The document is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid \"{field}\": {constraint}")]
pub struct InvalidValueError {
    /// Qualified field name, for example `time.duration`
    pub field: String,
    /// Violated constraint
    pub constraint: String,
}

impl InvalidValueError {
    pub(crate) fn new(field: &str, constraint: &str) -> Self {
        Self {
            field: field.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

/// Mismatch against the JSON document contract of the signal generator.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("schema mismatch on \"{field}\": {reason}")]
pub struct SchemaError {
    /// Qualified field name, for example `output.format`
    pub field: String,
    /// Reason for the mismatch
    pub reason: String,
}

impl SchemaError {
    pub(crate) fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<InvalidValueError> for SchemaError {
    fn from(e: InvalidValueError) -> Self {
        Self {
            field: e.field,
            reason: e.constraint,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] ParsingError),
    #[error("{0}")]
    InvalidValue(#[from] InvalidValueError),
    #[error("{0}")]
    Schema(#[from] SchemaError),
    #[error("i/o error: {0}")]
    StdioError(#[from] std::io::Error),
}
