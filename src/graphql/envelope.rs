//! The `{ data, errors }` response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::graphql::{ApplicationError, TransportError};

/// A single error reported by the endpoint.
///
/// Only `message` is interpreted. Any other fields (`locations`, `path`,
/// `extensions`, ...) are kept in [`extra`](Self::extra) untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorItem {
    /// Human-readable error message.
    pub message: String,
    /// Every other field of the error object.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ErrorItem {
    /// Creates an error item with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// The decoded response of an operation.
///
/// A non-empty `errors` list means the operation failed even though the
/// call itself succeeded.
///
/// # Example
///
/// ```rust
/// use tinyhouse_client::graphql::ResultEnvelope;
///
/// let envelope: ResultEnvelope = serde_json::from_str(
///     r#"{ "data": null, "errors": [{ "message": "boom", "path": ["deleteListing"] }] }"#,
/// ).unwrap();
///
/// assert!(envelope.has_errors());
/// assert_eq!(envelope.into_result().unwrap_err().to_string(), "boom");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<D = serde_json::Value> {
    /// The operation result, absent on failure.
    #[serde(default)]
    pub data: Option<D>,
    /// Application-level errors, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorItem>>,
}

impl<D> ResultEnvelope<D> {
    /// Creates a successful envelope.
    #[must_use]
    pub const fn success(data: D) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// Creates a failed envelope.
    #[must_use]
    pub const fn failure(errors: Vec<ErrorItem>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
        }
    }

    /// Returns `true` when `errors` is present and non-empty.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// Converts the envelope into the payload or an [`ApplicationError`].
    ///
    /// Errors take precedence over data: a partially populated `data` next to
    /// a non-empty `errors` list is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError`] when `errors` is non-empty, or when the
    /// envelope carries no data at all.
    pub fn into_result(self) -> Result<D, ApplicationError> {
        if self.has_errors() {
            return Err(ApplicationError::new(self.errors.unwrap_or_default()));
        }
        self.data.ok_or_else(ApplicationError::missing_data)
    }
}

impl ResultEnvelope<serde_json::Value> {
    /// Decodes the raw `data` into `D`.
    ///
    /// Envelopes with errors are not decoded: their data is dropped. For a
    /// successful envelope, a missing `data` is decoded from `null`, so
    /// payload types that accept `null` (such as `Option<T>`) succeed.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] when `data` does not match `D`.
    pub fn decode<D: DeserializeOwned>(self) -> Result<ResultEnvelope<D>, TransportError> {
        if self.has_errors() {
            return Ok(ResultEnvelope {
                data: None,
                errors: self.errors,
            });
        }

        let raw = self.data.unwrap_or(serde_json::Value::Null);
        let data = serde_json::from_value(raw).map_err(TransportError::Decode)?;
        Ok(ResultEnvelope {
            data: Some(data),
            errors: self.errors,
        })
    }
}
