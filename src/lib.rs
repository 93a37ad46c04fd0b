//! # TinyHouse Client
//!
//! A typed remote-operation client for the TinyHouse listings API. It turns
//! an asynchronous query or mutation into a predictable, observable state
//! (`loading | data | error`) with manual refetch.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - A validated [`Endpoint`] newtype
//! - An injectable [`Transport`](graphql::Transport) with an HTTP implementation
//! - A pure reducer over the `Fetch | FetchSuccess | FetchError` lifecycle
//! - [`QueryController`](graphql::QueryController): runs on creation, refetches on demand
//! - [`MutationController`](graphql::MutationController): runs on demand, reports its outcome
//! - Typed TinyHouse listings operations in [`listings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tinyhouse_client::{ClientConfig, Endpoint};
//!
//! let config = ClientConfig::builder()
//!     .endpoint(Endpoint::new("http://localhost:9000/api").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Running Operations
//!
//! ```rust,ignore
//! use tinyhouse_client::graphql::{HttpTransport, QueryController};
//! use tinyhouse_client::listings::{listings_query, ListingsData};
//!
//! let transport = HttpTransport::shared(&config);
//! let query: QueryController<ListingsData> = QueryController::new(transport, listings_query());
//!
//! let state = query.settled().await;
//! if state.error {
//!     // render a failure message
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: The transport is injected into each controller
//! - **Fail-fast validation**: Configuration newtypes validate on construction
//! - **Thread-safe**: Transports and controllers are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden policies**: No retries, caching or deduplication

pub mod clients;
pub mod config;
pub mod error;
pub mod graphql;
pub mod listings;

pub use config::{ClientConfig, ClientConfigBuilder, Endpoint};
pub use error::ConfigError;

pub use clients::{HttpClient, HttpError, HttpResponse, HttpResponseError};

pub use graphql::{
    ApplicationError, ErrorItem, HttpTransport, MutationController, Operation, OperationError,
    OperationState, QueryController, ResultEnvelope, Transport, TransportError,
};
