//! Payload validation against track type field specifications.

pub mod error;
pub mod validator;

pub use error::ValidationError;
pub use validator::{check_value, payload_from_json, Payload, PayloadValidator, ValidationOutcome};
