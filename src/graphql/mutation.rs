//! Write-style operations that only run when asked to.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use crate::graphql::lifecycle::{attempt, Lifecycle};
use crate::graphql::{Operation, OperationError, OperationState, Transport};

/// Drives one mutation. Nothing is sent until [`execute`](Self::execute) is
/// called, and nothing is retried.
///
/// Unlike [`QueryController`](crate::graphql::QueryController), every failure
/// is returned to the caller, who usually decides from it whether to refresh
/// related queries. The state (`data`, `loading`, `error`) reflects this
/// mutation's own attempts only.
///
/// # Example
///
/// ```rust,ignore
/// use tinyhouse_client::graphql::MutationController;
/// use tinyhouse_client::listings::{DeleteListingData, DeleteListingVariables, DELETE_LISTING};
///
/// let delete: MutationController<DeleteListingData, DeleteListingVariables> =
///     MutationController::new(transport, DELETE_LISTING);
///
/// match delete.execute(DeleteListingVariables { id: "42".to_string() }).await {
///     Ok(deleted) => println!("deleted {}", deleted.delete_listing.id),
///     Err(e) => println!("Uh oh! Something went wrong with deleting: {e}"),
/// }
/// ```
pub struct MutationController<D, V = serde_json::Value> {
    transport: Arc<dyn Transport>,
    text: String,
    lifecycle: Lifecycle<D>,
    variables: PhantomData<fn(V)>,
}

impl<D, V> MutationController<D, V>
where
    D: DeserializeOwned + Clone,
    V: Serialize,
{
    /// Creates the controller without contacting the endpoint.
    ///
    /// The state starts as `{ data: None, loading: false, error: false }`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, text: impl Into<String>) -> Self {
        Self {
            transport,
            text: text.into(),
            lifecycle: Lifecycle::new(OperationState::idle()),
            variables: PhantomData,
        }
    }

    /// Returns the mutation text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> OperationState<D> {
        self.lifecycle.snapshot()
    }

    /// Returns the payload of this mutation's last successful attempt.
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

    /// Runs the mutation with `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Transport`] when the call fails and
    /// [`OperationError::Application`] when the envelope carries errors; its
    /// message is the first error's message.
    ///
    /// Dropping the returned future before it completes settles the attempt
    /// as failed.
    pub async fn execute(&self, variables: V) -> Result<D, OperationError> {
        self.run(Operation::with_variables(self.text.as_str(), variables))
            .await
    }

    /// Runs a mutation that takes no variables.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn execute_without_variables(&self) -> Result<D, OperationError> {
        self.run(Operation::new(self.text.as_str())).await
    }

    async fn run(&self, operation: Operation<V>) -> Result<D, OperationError> {
        let pending = self.lifecycle.begin_scoped();
        let outcome = attempt::<D, V>(self.transport.as_ref(), &operation).await;
        if let Err(e) = &outcome {
            tracing::debug!("Mutation failed: {}", e);
        }
        pending.settle(&outcome);
        outcome
    }
}

impl<D: fmt::Debug, V> fmt::Debug for MutationController<D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationController")
            .field("text", &self.text)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

// Verify MutationController is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MutationController<serde_json::Value>>();
};
