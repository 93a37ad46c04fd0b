//! Error types for remote operations.
//!
//! Two failure kinds are kept apart on purpose:
//!
//! - [`TransportError`]: the call itself failed (connection, non-2xx status,
//!   undecodable body). Never carries partial data.
//! - [`ApplicationError`]: the envelope arrived but its `errors` list was
//!   non-empty. Any `data` in that envelope is discarded.
//!
//! [`OperationError`] is what controllers hand back to their callers.
//!
//! # Example
//!
//! ```rust
//! use tinyhouse_client::graphql::{ApplicationError, ErrorItem, OperationError};
//!
//! let error: OperationError = ApplicationError::new(vec![ErrorItem::new("boom")]).into();
//! assert_eq!(error.to_string(), "boom");
//! assert!(error.is_application());
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::HttpError;
use crate::graphql::ErrorItem;

/// Error returned when an operation could not be delivered or its response
/// could not be read.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network failure or non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The operation variables could not be encoded as JSON.
    #[error("Failed to encode operation variables: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body was not a valid envelope, or its `data` did not
    /// match the expected shape.
    #[error("Failed to decode response envelope: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Error returned when the endpoint answered with a non-empty `errors` list.
///
/// Displays the first error message, which is what callers typically show.
#[derive(Clone, Debug, PartialEq, Error)]
pub struct ApplicationError {
    errors: Vec<ErrorItem>,
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl ApplicationError {
    const MISSING_DATA: &'static str = "Response contained neither data nor errors";

    /// Creates an application error from the envelope's error items.
    #[must_use]
    pub const fn new(errors: Vec<ErrorItem>) -> Self {
        Self { errors }
    }

    /// Error for an envelope that carried no `data` and no `errors`.
    #[must_use]
    pub fn missing_data() -> Self {
        Self::new(vec![ErrorItem::new(Self::MISSING_DATA)])
    }

    /// Returns the first error message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.errors
            .first()
            .map_or(Self::MISSING_DATA, |item| item.message.as_str())
    }

    /// Returns every error item reported by the endpoint.
    #[must_use]
    pub fn errors(&self) -> &[ErrorItem] {
        &self.errors
    }
}

/// Outcome error of a controller attempt.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The call failed before an envelope could be read.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The envelope reported application-level errors.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl OperationError {
    /// Returns `true` for a transport-level failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` for an application-level failure.
    #[must_use]
    pub const fn is_application(&self) -> bool {
        matches!(self, Self::Application(_))
    }
}
