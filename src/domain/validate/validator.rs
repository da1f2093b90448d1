//! Checks an untyped payload against the field specification of its track type.

use crate::domain::track::{FieldRule, FieldSpec, PrimitiveKind, Scalar, TrackTypeRegistry, ValueKind};
use crate::domain::validate::ValidationError;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Field name -> untyped value, in insertion order.
pub type Payload = serde_json::Map<String, JsonValue>;

/// `Ok(())` means valid.
pub type ValidationOutcome = Result<(), ValidationError>;

/// Maps a raw `data` value to an optional payload.
///
/// `null` is an absent payload and an object is a payload. Anything else is
/// rejected before it reaches the validator.
pub fn payload_from_json(value: &JsonValue) -> Result<Option<&Payload>, ValidationError> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Object(map) => Ok(Some(map)),
        other => Err(ValidationError::MalformedPayload(ValueKind::of(other))),
    }
}

/// Validates payloads against an immutable [`TrackTypeRegistry`].
///
/// Holds no mutable state, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct PayloadValidator {
    registry: Arc<TrackTypeRegistry>,
}

impl PayloadValidator {
    pub fn new(registry: Arc<TrackTypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TrackTypeRegistry {
        &self.registry
    }

    /// Validates `payload` for `track_type`, stopping at the first offending field.
    ///
    /// - unknown track type fails whatever the payload
    /// - an absent payload is always valid
    /// - an empty field specification only accepts an empty payload
    /// - every payload key must be declared and satisfy its rule; declared
    ///   fields may be omitted
    pub fn validate(&self, track_type: &str, payload: Option<&Payload>) -> ValidationOutcome {
        let fields = self.resolve(track_type)?;
        let Some(payload) = payload else {
            return Ok(());
        };

        if fields.is_empty() {
            if payload.is_empty() {
                return Ok(());
            }
            return Err(rejected(
                track_type,
                ValidationError::NonEmptyPayloadForEmptySchema(track_type.to_string()),
            ));
        }

        for (key, value) in payload {
            check_field(fields, key, value).map_err(|e| rejected(track_type, e))?;
        }
        Ok(())
    }

    /// Same checks as [`validate`](Self::validate) without short-circuiting.
    ///
    /// Returns every failure in payload order; an empty list means valid.
    pub fn violations(&self, track_type: &str, payload: Option<&Payload>) -> Vec<ValidationError> {
        let fields = match self.resolve(track_type) {
            Ok(fields) => fields,
            Err(e) => return vec![e],
        };
        let Some(payload) = payload else {
            return Vec::new();
        };

        if fields.is_empty() {
            if payload.is_empty() {
                return Vec::new();
            }
            return vec![ValidationError::NonEmptyPayloadForEmptySchema(
                track_type.to_string(),
            )];
        }

        payload
            .iter()
            .filter_map(|(key, value)| check_field(fields, key, value).err())
            .map(|e| rejected(track_type, e))
            .collect()
    }

    fn resolve(&self, track_type: &str) -> Result<&FieldSpec, ValidationError> {
        self.registry.lookup(track_type).ok_or_else(|| {
            tracing::debug!(code = "UNKNOWN_TRACK_TYPE", "payload rejected");
            ValidationError::UnknownTrackType(track_type.to_string())
        })
    }
}

fn rejected(track_type: &str, err: ValidationError) -> ValidationError {
    // Field names only; values are user controlled and never logged.
    tracing::debug!(
        track_type,
        field = err.field().unwrap_or("-"),
        code = err.code(),
        "payload rejected"
    );
    err
}

fn check_field(fields: &FieldSpec, key: &str, value: &JsonValue) -> ValidationOutcome {
    let rule = fields
        .get(key)
        .ok_or_else(|| ValidationError::UnknownField(key.to_string()))?;
    check_value(key, rule, value)
}

/// Checks one value against one rule. No coercion is applied.
pub fn check_value(field: &str, rule: &FieldRule, value: &JsonValue) -> ValidationOutcome {
    match rule {
        FieldRule::Typed(expected) => {
            let actual = Scalar::from_json(value).map(|s| s.kind());
            if actual == Some(*expected) {
                Ok(())
            } else {
                Err(ValidationError::TypeMismatch {
                    field: field.to_string(),
                    expected: *expected,
                    got: ValueKind::of(value),
                })
            }
        }
        FieldRule::Enum(allowed) => {
            // A collection is never a member, even if every element is.
            if allowed.iter().any(|candidate| candidate.matches(value)) {
                Ok(())
            } else {
                Err(ValidationError::ValueNotAllowed {
                    field: field.to_string(),
                    allowed: FieldRule::allowed_values(allowed),
                })
            }
        }
        FieldRule::Range { min, max } => {
            let Some(n) = value.as_f64() else {
                return Err(ValidationError::TypeMismatch {
                    field: field.to_string(),
                    expected: PrimitiveKind::Number,
                    got: ValueKind::of(value),
                });
            };
            if n < *min || n > *max {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: *min,
                    max: *max,
                });
            }
            Ok(())
        }
    }
}
