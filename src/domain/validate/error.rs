use crate::domain::track::{PrimitiveKind, ValueKind};
use thiserror::Error;

/// Why a payload was rejected.
///
/// Every variant is an expected outcome of untrusted input. The `Display`
/// output is the client-facing reason and never contains payload values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown track type: {0}")]
    UnknownTrackType(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field '{field}' expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: PrimitiveKind,
        got: ValueKind,
    },

    /// Not a member of the enumerated set, or a collection instead of a scalar.
    #[error("field '{field}' must be one of {allowed}")]
    ValueNotAllowed { field: String, allowed: String },

    #[error("field '{field}' must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    #[error("track type {0} does not accept data")]
    NonEmptyPayloadForEmptySchema(String),

    #[error("data must be an object, got {0}")]
    MalformedPayload(ValueKind),
}

impl ValidationError {
    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnknownTrackType(_) => "UNKNOWN_TRACK_TYPE",
            ValidationError::UnknownField(_) => "UNKNOWN_FIELD",
            ValidationError::TypeMismatch { .. } => "TYPE_MISMATCH",
            ValidationError::ValueNotAllowed { .. } => "VALUE_NOT_ALLOWED",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::NonEmptyPayloadForEmptySchema(_) => "DATA_NOT_ACCEPTED",
            ValidationError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
        }
    }

    /// The offending payload field, when the error is about one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::UnknownField(field)
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::ValueNotAllowed { field, .. }
            | ValidationError::OutOfRange { field, .. } => Some(field),
            ValidationError::UnknownTrackType(_)
            | ValidationError::NonEmptyPayloadForEmptySchema(_)
            | ValidationError::MalformedPayload(_) => None,
        }
    }
}
