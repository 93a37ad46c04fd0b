//! Configuration error types for the TinyHouse client.
//!
//! This module contains the error type returned when building a
//! [`ClientConfig`](crate::ClientConfig) or one of its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use tinyhouse_client::{ConfigError, Endpoint};
//!
//! let result = Endpoint::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyEndpoint)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint URL cannot be empty.
    #[error("Endpoint URL cannot be empty. Please provide the URL of the API endpoint.")]
    EmptyEndpoint,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'http://localhost:9000/api').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Request timeout must be greater than zero.
    #[error("Invalid request timeout. The timeout must be greater than zero.")]
    ZeroTimeout,
}
