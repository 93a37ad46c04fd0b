//! The transport seam between controllers and the endpoint.
//!
//! [`Transport`] works on JSON values so it can be used as a trait object
//! (`Arc<dyn Transport>`) and replaced by test doubles. The typed
//! [`send`] helper does the serde work on either side of it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::HttpClient;
use crate::config::ClientConfig;
use crate::graphql::{Operation, OperationRequest, ResultEnvelope, TransportError};

/// Delivers one encoded operation and returns the raw envelope.
///
/// Implementations issue exactly one call per invocation: no retries and no
/// caching. Application-level `errors` must be returned inside the envelope,
/// never as a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the undecoded envelope.
    async fn execute(
        &self,
        request: OperationRequest,
    ) -> Result<ResultEnvelope<serde_json::Value>, TransportError>;
}

/// Sends a typed operation through `transport` and decodes the envelope.
///
/// # Errors
///
/// Returns [`TransportError`] when the variables cannot be encoded, the call
/// fails, or the envelope's `data` does not decode into `D`. An envelope with
/// application errors is returned as `Ok`.
pub async fn send<D, V>(
    transport: &dyn Transport,
    operation: &Operation<V>,
) -> Result<ResultEnvelope<D>, TransportError>
where
    D: DeserializeOwned,
    V: Serialize,
{
    let request = operation.to_request()?;
    let envelope = transport.execute(request).await?;
    envelope.decode()
}

/// [`Transport`] posting JSON to a single HTTP endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tinyhouse_client::{ClientConfig, Endpoint};
/// use tinyhouse_client::graphql::HttpTransport;
///
/// let config = ClientConfig::builder()
///     .endpoint(Endpoint::new("http://localhost:9000/api").unwrap())
///     .build()
///     .unwrap();
///
/// let transport = HttpTransport::shared(&config);
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    http_client: HttpClient,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport for the configured endpoint.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
        }
    }

    /// Creates a transport ready to be handed to controllers.
    #[must_use]
    pub fn shared(config: &ClientConfig) -> Arc<dyn Transport> {
        Arc::new(Self::new(config))
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: OperationRequest,
    ) -> Result<ResultEnvelope<serde_json::Value>, TransportError> {
        let body = serde_json::to_value(&request).map_err(TransportError::Serialize)?;
        let response = self.http_client.post_json(&body).await?;
        response.json().map_err(TransportError::Decode)
    }
}
