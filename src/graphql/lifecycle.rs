//! Attempt bookkeeping shared by the query and mutation controllers.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use crate::graphql::{reduce, send, Action, Operation, OperationError, OperationState, Transport};

/// Owns one [`OperationState`] and serializes every dispatch into it.
///
/// Each attempt takes a sequence number in [`begin`](Self::begin). Only the
/// most recently started attempt may settle the state; older attempts are
/// dropped in [`settle`](Self::settle).
#[derive(Debug)]
pub(crate) struct Lifecycle<D> {
    state: watch::Sender<OperationState<D>>,
    latest: AtomicU64,
}

impl<D: Clone> Lifecycle<D> {
    pub(crate) fn new(initial: OperationState<D>) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            latest: AtomicU64::new(0),
        }
    }

    pub(crate) fn snapshot(&self) -> OperationState<D> {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<OperationState<D>> {
        self.state.subscribe()
    }

    /// Starts an attempt: dispatches `Fetch` and returns its sequence number.
    pub(crate) fn begin(&self) -> u64 {
        let mut attempt = 0;
        self.state.send_modify(|state| {
            attempt = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = reduce(std::mem::take(state), Action::Fetch);
        });
        tracing::debug!("Attempt {} started", attempt);
        attempt
    }

    /// Starts an attempt tied to the returned guard.
    ///
    /// The guard settles the attempt as failed when it is dropped before
    /// [`Pending::settle`] runs.
    pub(crate) fn begin_scoped(&self) -> Pending<'_, D> {
        Pending {
            lifecycle: self,
            attempt: self.begin(),
            settled: false,
        }
    }

    /// Settles `attempt` with its outcome.
    ///
    /// Returns `false` when a newer attempt has started since, in which case
    /// the state is left untouched.
    pub(crate) fn settle(&self, attempt: u64, outcome: &Result<D, OperationError>) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != attempt {
                return false;
            }
            let action = match outcome {
                Ok(data) => Action::FetchSuccess(data.clone()),
                Err(_) => Action::FetchError,
            };
            tracing::debug!("Attempt {} settled with {}", attempt, action);
            *state = reduce(std::mem::take(state), action);
            true
        });

        if !applied {
            tracing::debug!(
                "Attempt {} superseded by attempt {}, dropping its result",
                attempt,
                self.latest.load(Ordering::SeqCst)
            );
        }
        applied
    }

    /// Settles an attempt whose caller went away as failed.
    fn abandon(&self, attempt: u64) -> bool {
        self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != attempt {
                return false;
            }
            tracing::debug!("Attempt {} abandoned before settling", attempt);
            *state = reduce(std::mem::take(state), Action::FetchError);
            true
        })
    }
}

/// An attempt started by [`Lifecycle::begin_scoped`] that has not settled yet.
#[must_use = "dropping the guard settles the attempt as failed"]
pub(crate) struct Pending<'a, D: Clone> {
    lifecycle: &'a Lifecycle<D>,
    attempt: u64,
    settled: bool,
}

impl<D: Clone> Pending<'_, D> {
    /// Settles the attempt with its outcome, see [`Lifecycle::settle`].
    pub(crate) fn settle(mut self, outcome: &Result<D, OperationError>) -> bool {
        self.settled = true;
        self.lifecycle.settle(self.attempt, outcome)
    }
}

impl<D: Clone> Drop for Pending<'_, D> {
    fn drop(&mut self) {
        if !self.settled {
            self.lifecycle.abandon(self.attempt);
        }
    }
}

/// Sends `operation` and folds application errors into the outcome.
pub(crate) async fn attempt<D, V>(
    transport: &dyn Transport,
    operation: &Operation<V>,
) -> Result<D, OperationError>
where
    D: DeserializeOwned,
    V: Serialize,
{
    let envelope = send::<D, V>(transport, operation).await?;
    Ok(envelope.into_result()?)
}
