//! Errors raised while filling or reading datums.

use thiserror::Error;

use super::definition::DatumParameterKey;

/// Failure to build a datum from parameters, or to read parameters back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatumError {
    /// A parameter required by the definition was not supplied.
    #[error("missing datum parameter: {0}")]
    MissingParameter(DatumParameterKey),

    /// A parameter was supplied with the wrong kind of value.
    #[error("parameter {key} must be {expected}")]
    TypeMismatch {
        /// The offending parameter.
        key: DatumParameterKey,
        /// The value kind the definition requires.
        expected: &'static str,
    },

    /// A parameter used as a constructor tag is negative.
    #[error("parameter {0} is not a valid constructor tag")]
    InvalidConstructorTag(DatumParameterKey),

    /// A fixed constructor tag in the datum does not match the definition.
    #[error("constructor mismatch: expected {expected}, found {found}")]
    ConstructorMismatch {
        /// Tag required by the definition.
        expected: u64,
        /// Tag found in the datum.
        found: u64,
    },

    /// A constructor has a different number of fields than the definition.
    #[error("field count mismatch: expected {expected}, found {found}")]
    FieldCountMismatch {
        /// Fields in the definition.
        expected: usize,
        /// Fields in the datum.
        found: usize,
    },

    /// A datum node has a different kind than the definition expects.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Node kind in the definition.
        expected: &'static str,
        /// Node kind in the datum.
        found: &'static str,
    },

    /// The same parameter resolved to two different values in one datum.
    #[error("conflicting values for parameter {0}")]
    ConflictingParameter(DatumParameterKey),
}
