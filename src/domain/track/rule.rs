//! Field rules: the validation contract for a single payload field.
//!
//! Rules are declared in configuration using a loose JSON form:
//! - a type tag string (`"number"`, `"string"`, `"boolean"`)
//! - an array of literal scalars (enumerated values)
//! - a `{ "min": .., "max": .. }` object (inclusive numeric range)
//!
//! That form is parsed once, at load time, into [`FieldRule`].

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Primitive type tag for [`FieldRule::Typed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "number" => Some(PrimitiveKind::Number),
            "string" => Some(PrimitiveKind::String),
            "boolean" => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime shape of an untyped JSON value. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Number,
    String,
    Boolean,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Bool(_) => ValueKind::Boolean,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal scalar. This is the closed set of values a payload field may carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Scalar {
    /// Classifies a JSON value. Returns `None` for null, arrays and objects.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_f64().map(Scalar::Number),
            JsonValue::String(s) => Some(Scalar::String(s.clone())),
            JsonValue::Bool(b) => Some(Scalar::Boolean(*b)),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Scalar::Number(_) => PrimitiveKind::Number,
            Scalar::String(_) => PrimitiveKind::String,
            Scalar::Boolean(_) => PrimitiveKind::Boolean,
        }
    }

    /// Compares against a JSON value without allocating.
    pub fn matches(&self, value: &JsonValue) -> bool {
        match (self, value) {
            (Scalar::Number(a), JsonValue::Number(b)) => b.as_f64() == Some(*a),
            (Scalar::String(a), JsonValue::String(b)) => a == b,
            (Scalar::Boolean(a), JsonValue::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{:?}", s),
            Scalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&Scalar> for JsonValue {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::Number(n) => number_to_json(*n),
            Scalar::String(s) => JsonValue::from(s.as_str()),
            Scalar::Boolean(b) => JsonValue::from(*b),
        }
    }
}

/// Validation rule for one declared field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "JsonValue")]
pub enum FieldRule {
    /// The value must have exactly this primitive type.
    Typed(PrimitiveKind),
    /// The value must equal one of these literals. Anything else, including a
    /// value of another JSON type, is reported as not allowed.
    Enum(Vec<Scalar>),
    /// The value must be a number with `min <= value <= max`.
    Range { min: f64, max: f64 },
}

impl FieldRule {
    /// Parses the configuration form of a rule.
    pub fn from_json(def: &JsonValue) -> Result<Self, String> {
        let rule = match def {
            JsonValue::String(tag) => PrimitiveKind::from_tag(tag)
                .map(FieldRule::Typed)
                .ok_or_else(|| format!("unknown type tag '{}'", tag))?,
            JsonValue::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| {
                        Scalar::from_json(item).ok_or_else(|| {
                            format!("enum values must be scalars, got {}", ValueKind::of(item))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                FieldRule::Enum(values)
            }
            JsonValue::Object(obj) => {
                if let Some(extra) = obj.keys().find(|k| *k != "min" && *k != "max") {
                    return Err(format!("unexpected key '{}' in range", extra));
                }
                let bound = |name: &str| {
                    obj.get(name)
                        .and_then(|v| v.as_f64())
                        .ok_or_else(|| format!("range requires a numeric '{}'", name))
                };
                FieldRule::Range {
                    min: bound("min")?,
                    max: bound("max")?,
                }
            }
            other => {
                return Err(format!(
                    "expected a type tag, an array or a range, got {}",
                    ValueKind::of(other)
                ))
            }
        };
        rule.check_definition()?;
        Ok(rule)
    }

    /// Rejects rules that could never accept a value.
    pub fn check_definition(&self) -> Result<(), String> {
        match self {
            FieldRule::Typed(_) => Ok(()),
            FieldRule::Enum(values) if values.is_empty() => {
                Err("enum must list at least one value".to_string())
            }
            FieldRule::Enum(_) => Ok(()),
            FieldRule::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err("range bounds must be finite".to_string());
                }
                if min > max {
                    return Err(format!("range min {} is greater than max {}", min, max));
                }
                Ok(())
            }
        }
    }

    /// Comma separated list of allowed values, for diagnostics.
    pub(crate) fn allowed_values(values: &[Scalar]) -> String {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<FieldRule> for JsonValue {
    fn from(rule: FieldRule) -> Self {
        match rule {
            FieldRule::Typed(kind) => JsonValue::from(kind.as_str()),
            FieldRule::Enum(values) => JsonValue::Array(values.iter().map(JsonValue::from).collect()),
            FieldRule::Range { min, max } => serde_json::json!({
                "min": number_to_json(min),
                "max": number_to_json(max),
            }),
        }
    }
}

// Keeps integral bounds/literals rendered as `5` rather than `5.0`.
fn number_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        JsonValue::from(n as i64)
    } else {
        JsonValue::from(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_type_tags() {
        assert_eq!(
            FieldRule::from_json(&json!("number")).unwrap(),
            FieldRule::Typed(PrimitiveKind::Number)
        );
        assert_eq!(
            FieldRule::from_json(&json!("boolean")).unwrap(),
            FieldRule::Typed(PrimitiveKind::Boolean)
        );
        let err = FieldRule::from_json(&json!("integer")).unwrap_err();
        assert!(err.contains("unknown type tag 'integer'"));
    }

    #[test]
    fn parses_enum_and_range() {
        assert_eq!(
            FieldRule::from_json(&json!(["Low", "High"])).unwrap(),
            FieldRule::Enum(vec![
                Scalar::String("Low".to_string()),
                Scalar::String("High".to_string())
            ])
        );
        assert_eq!(
            FieldRule::from_json(&json!({ "min": 1, "max": 5 })).unwrap(),
            FieldRule::Range { min: 1.0, max: 5.0 }
        );
    }

    #[test]
    fn rejects_unusable_definitions() {
        assert!(FieldRule::from_json(&json!([])).is_err());
        assert!(FieldRule::from_json(&json!([["nested"]])).is_err());
        assert!(FieldRule::from_json(&json!({ "min": 5, "max": 1 })).is_err());
        assert!(FieldRule::from_json(&json!({ "min": 1 })).is_err());
        assert!(FieldRule::from_json(&json!({ "min": 1, "max": 2, "step": 1 })).is_err());
        assert!(FieldRule::from_json(&json!(42)).is_err());
    }

    #[test]
    fn large_bounds_keep_their_value() {
        let max = 9_223_372_036_854_775_808.0;
        let range = serde_json::to_value(FieldRule::Range { min: 0.0, max }).unwrap();
        assert_eq!(range["min"], json!(0));
        assert_eq!(range["max"].as_f64(), Some(max));
        assert!(!range["max"].is_i64());

        let small = serde_json::to_value(FieldRule::Range { min: i64::MIN as f64, max: 0.0 }).unwrap();
        assert_eq!(small["min"], json!(i64::MIN));
    }

    #[test]
    fn serializes_back_to_config_form() {
        let range = serde_json::to_value(FieldRule::Range { min: 1.0, max: 5.0 }).unwrap();
        assert_eq!(range, json!({ "min": 1, "max": 5 }));

        let levels = serde_json::to_value(FieldRule::Enum(vec![
            Scalar::Number(1.0),
            Scalar::Number(2.5),
        ]))
        .unwrap();
        assert_eq!(levels, json!([1, 2.5]));
    }

    #[test]
    fn scalar_matches_by_value() {
        assert!(Scalar::Number(3.0).matches(&json!(3)));
        assert!(Scalar::Number(3.0).matches(&json!(3.0)));
        assert!(!Scalar::Number(3.0).matches(&json!("3")));
        assert!(Scalar::String("Low".into()).matches(&json!("Low")));
        assert!(!Scalar::Boolean(true).matches(&json!(1)));
    }
}
