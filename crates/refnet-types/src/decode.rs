//! Decoding boundary
//!
//! Backend JSON is parsed into the typed structs of this crate and then
//! checked with [`Validate`]. Nothing unvalidated reaches the caller.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to turn a backend body into a typed value
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Body was not JSON, or a required field was missing or mistyped
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Body parsed but a field holds a value the client refuses to use
    #[error("invalid field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl DecodeError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path with the enclosing field, e.g. `levels[2].` + `rate`
    pub fn within(self, parent: &str) -> Self {
        match self {
            DecodeError::Invalid { field, reason } => DecodeError::Invalid {
                field: format!("{}.{}", parent, field),
                reason,
            },
            other => other,
        }
    }
}

/// Semantic checks applied after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), DecodeError>;
}

/// Parse and validate a response body
pub fn decode<T>(body: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body)?;
    value.validate()?;
    Ok(value)
}

/// Reject empty or whitespace-only strings
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), DecodeError> {
    if value.trim().is_empty() {
        return Err(DecodeError::invalid(field, "must not be blank"));
    }
    Ok(())
}

/// Validate every element of a named list field, producing `field[i].child` paths
pub(crate) fn validate_each<T: Validate>(field: &str, items: &[T]) -> Result<(), DecodeError> {
    for (i, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|e| e.within(&format!("{}[{}]", field, i)))?;
    }
    Ok(())
}
