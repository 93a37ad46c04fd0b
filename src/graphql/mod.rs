//! Typed remote operations with observable lifecycles.
//!
//! This module turns an asynchronous query or mutation call into a
//! predictable state (`loading | data | error`).
//!
//! # Overview
//!
//! - [`Operation`]: Operation text plus optional typed variables
//! - [`ResultEnvelope`] / [`ErrorItem`]: The `{ data, errors }` response contract
//! - [`Transport`] / [`HttpTransport`]: The injected capability that sends operations
//! - [`OperationState`], [`Action`], [`reduce`]: The lifecycle state machine
//! - [`QueryController`]: Runs a query on creation and on demand
//! - [`MutationController`]: Runs a mutation on demand and reports its outcome
//!
//! # Error Propagation
//!
//! The two controllers deliberately treat failures differently. A query's
//! automatic runs swallow failures into `error == true`; a mutation's
//! `execute` always returns them, because the caller's next step (such as
//! refetching a related query) depends on the outcome.
//!
//! # Overlapping Attempts
//!
//! Every attempt is numbered when it starts. Only the most recently started
//! attempt of a controller may settle its state; results of superseded
//! attempts are dropped (they are still returned to whoever awaited them).
//!
//! # Example
//!
//! ```rust,ignore
//! use tinyhouse_client::graphql::{HttpTransport, MutationController, Operation, QueryController};
//!
//! let transport = HttpTransport::shared(&config);
//!
//! let listings: QueryController<ListingsData> =
//!     QueryController::new(transport.clone(), Operation::new(LISTINGS));
//! let delete: MutationController<DeleteListingData, DeleteListingVariables> =
//!     MutationController::new(transport, DELETE_LISTING);
//!
//! delete.execute(DeleteListingVariables { id }).await?;
//! listings.refetch().await?;
//! ```

mod envelope;
mod errors;
mod lifecycle;
mod mutation;
mod operation;
mod query;
mod state;
mod transport;

pub use envelope::{ErrorItem, ResultEnvelope};
pub use errors::{ApplicationError, OperationError, TransportError};
pub use mutation::MutationController;
pub use operation::{Operation, OperationRequest};
pub use query::QueryController;
pub use state::{reduce, Action, OperationState};
pub use transport::{send, HttpTransport, Transport};
