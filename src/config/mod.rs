//! Configuration types for the TinyHouse client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration handed to the HTTP transport
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`Endpoint`]: A validated endpoint URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tinyhouse_client::{ClientConfig, Endpoint};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("http://localhost:9000/api").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::Endpoint;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the HTTP transport.
///
/// The client itself performs no retries and applies no timeout unless one is
/// configured here.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    endpoint: Endpoint,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    extra_headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the endpoint every operation is posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the headers added to every request.
    #[must_use]
    pub const fn extra_headers(&self) -> &HashMap<String, String> {
        &self.extra_headers
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `endpoint` is required. Everything else is optional.
///
/// # Example
///
/// ```rust
/// use tinyhouse_client::{ClientConfig, Endpoint};
///
/// let config = ClientConfig::builder()
///     .endpoint(Endpoint::new("http://localhost:9000").unwrap())
///     .user_agent_prefix("TinyHouseWeb/1.0")
///     .header("X-Client", "listings")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.endpoint().as_ref(), "http://localhost:9000/api");
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<Endpoint>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    extra_headers: HashMap<String, String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no endpoint was set and
    /// [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(ClientConfig {
            endpoint,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            extra_headers: self.extra_headers,
        })
    }
}
