//! HTTP client types for endpoint communication.
//!
//! This module provides the low-level HTTP layer underneath
//! [`HttpTransport`](crate::graphql::HttpTransport):
//!
//! - [`HttpClient`]: The async HTTP client that posts JSON bodies
//! - [`HttpResponse`]: A raw response from the endpoint
//! - [`HttpError`]: Network failures and non-2xx responses
//!
//! # Retry Behavior
//!
//! None. Each call issues exactly one request; retrying is up to the caller
//! (see [`QueryController::refetch`](crate::graphql::QueryController::refetch)).

mod errors;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_response::HttpResponse;
