//! Read-style operations that run on their own.

use std::fmt;
use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::graphql::lifecycle::{attempt, Lifecycle};
use crate::graphql::{Operation, OperationError, OperationState, Transport};

/// Drives one query: runs it on construction, again whenever its operation
/// changes, and on demand through [`refetch`](Self::refetch).
///
/// Failures of the automatic runs are never returned to anyone. They show up
/// as `error == true` in the state and are logged with `tracing`.
///
/// Overlapping attempts are not deduplicated. Only the most recently started
/// attempt may settle the state, so a slow earlier response never overwrites
/// a newer one.
///
/// # Example
///
/// ```rust,ignore
/// use tinyhouse_client::graphql::{HttpTransport, Operation, QueryController};
/// use tinyhouse_client::listings::ListingsData;
///
/// let transport = HttpTransport::shared(&config);
/// let query: QueryController<ListingsData> =
///     QueryController::new(transport, Operation::new("query Listings { listings { id title } }"));
///
/// let state = query.settled().await;
/// if state.error {
///     println!("Uh oh! Something went wrong - please try again later :(");
/// } else if let Some(data) = state.data {
///     println!("{} listings", data.listings.len());
/// }
///
/// // Later, after a mutation
/// query.refetch().await?;
/// ```
pub struct QueryController<D, V = serde_json::Value> {
    transport: Arc<dyn Transport>,
    operation: Operation<V>,
    lifecycle: Arc<Lifecycle<D>>,
}

impl<D, V> QueryController<D, V>
where
    D: DeserializeOwned + Clone + Send + Sync + 'static,
    V: Serialize + Clone + Send + Sync + 'static,
{
    /// Creates the controller and starts the first attempt.
    ///
    /// The state starts as `{ data: None, loading: true, error: false }`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime, since the first attempt
    /// is spawned onto it.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, operation: Operation<V>) -> Self {
        let controller = Self {
            transport,
            operation,
            lifecycle: Arc::new(Lifecycle::new(OperationState::loading())),
        };
        controller.spawn_attempt();
        controller
    }

    /// Returns the operation currently driven by this controller.
    #[must_use]
    pub const fn operation(&self) -> &Operation<V> {
        &self.operation
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> OperationState<D> {
        self.lifecycle.snapshot()
    }

    /// Returns the payload of the last successful attempt.
    #[must_use]
    pub fn data(&self) -> Option<D> {
        self.state().data
    }

    /// Returns `true` while an attempt is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state().loading
    }

    /// Returns `true` when the last settled attempt failed.
    #[must_use]
    pub fn error(&self) -> bool {
        self.state().error
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OperationState<D>> {
        self.lifecycle.subscribe()
    }

    /// Waits until no attempt is in flight and returns that state.
    pub async fn settled(&self) -> OperationState<D> {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(OperationState::is_settled).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.state())
    }

    /// Runs the query again and returns this attempt's own outcome.
    ///
    /// The state is updated exactly as for an automatic run. The returned
    /// result is for callers that want to react to the outcome; ignoring it
    /// is always fine. When a newer attempt starts before this one settles,
    /// this attempt's result is still returned but not applied to the state.
    /// Dropping the returned future before it completes settles the attempt
    /// as failed, unless a newer attempt has started since.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError`] when the transport fails or the envelope
    /// carries errors.
    pub async fn refetch(&self) -> Result<D, OperationError> {
        let pending = self.lifecycle.begin_scoped();
        let outcome = attempt::<D, V>(self.transport.as_ref(), &self.operation).await;
        if let Err(e) = &outcome {
            tracing::debug!("Refetch of query failed: {}", e);
        }
        pending.settle(&outcome);
        outcome
    }

    /// Runs the query again in the background.
    ///
    /// Failures are only visible through the state.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn spawn_refetch(&self) -> JoinHandle<()> {
        self.spawn_attempt()
    }

    /// Replaces the operation and reruns it when its identity changed.
    ///
    /// Returns `true` when a new attempt was started. An operation equal to
    /// the current one (same text and variables) is ignored.
    ///
    /// # Panics
    ///
    /// Panics when a new attempt is needed outside of a Tokio runtime.
    pub fn set_operation(&mut self, operation: Operation<V>) -> bool
    where
        V: PartialEq,
    {
        if operation == self.operation {
            return false;
        }
        tracing::debug!(
            "Query operation changed, rerunning: {}",
            operation.text().trim()
        );
        self.operation = operation;
        self.spawn_attempt();
        true
    }

    /// Starts an attempt whose failure is absorbed into the state.
    ///
    /// The task only holds a weak handle on the state, so a controller
    /// dropped mid-flight is never written to.
    fn spawn_attempt(&self) -> JoinHandle<()> {
        let seq = self.lifecycle.begin();
        let transport = Arc::clone(&self.transport);
        let operation = self.operation.clone();
        let lifecycle: Weak<Lifecycle<D>> = Arc::downgrade(&self.lifecycle);

        tokio::spawn(async move {
            let outcome = attempt::<D, V>(transport.as_ref(), &operation).await;
            if let Err(e) = &outcome {
                tracing::warn!("Query failed: {}", e);
            }
            match lifecycle.upgrade() {
                Some(lifecycle) => {
                    lifecycle.settle(seq, &outcome);
                }
                None => {
                    tracing::debug!("Query controller dropped before attempt {} settled", seq);
                }
            }
        })
    }
}

impl<D: fmt::Debug, V: fmt::Debug> fmt::Debug for QueryController<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryController")
            .field("operation", &self.operation)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
