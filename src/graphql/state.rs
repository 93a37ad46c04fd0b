//! Lifecycle state of one operation and the reducer that drives it.
//!
//! The reducer is a pure function over a closed set of actions:
//!
//! | Action                  | `loading` | `error` | `data`          |
//! |-------------------------|-----------|---------|-----------------|
//! | [`Action::Fetch`]       | `true`    | `false` | unchanged       |
//! | [`Action::FetchSuccess`]| `false`   | `false` | replaced        |
//! | [`Action::FetchError`]  | `false`   | `true`  | unchanged       |

use std::fmt;

/// Snapshot of one controller's operation lifecycle.
///
/// `loading` and `error` are never both `true`. `data` survives a new attempt
/// so stale results can stay on screen while a refetch is in flight, but
/// `error` is cleared as soon as an attempt starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationState<D> {
    /// Payload of the most recent successful attempt.
    pub data: Option<D>,
    /// An attempt is in flight.
    pub loading: bool,
    /// The most recent settled attempt failed.
    pub error: bool,
}

impl<D> OperationState<D> {
    /// State of a query that starts fetching immediately.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: false,
        }
    }

    /// State of an operation that has not run yet.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: false,
        }
    }

    /// Returns `true` once no attempt is in flight.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !self.loading
    }
}

impl<D> Default for OperationState<D> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Transition request for [`reduce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<D> {
    /// An attempt started.
    Fetch,
    /// An attempt succeeded with this payload.
    FetchSuccess(D),
    /// An attempt failed.
    FetchError,
}

impl<D> Action<D> {
    /// Returns the action tag used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fetch => "FETCH",
            Self::FetchSuccess(_) => "FETCH_SUCCESS",
            Self::FetchError => "FETCH_ERROR",
        }
    }
}

impl<D> fmt::Display for Action<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Applies `action` to `state`.
///
/// The match is exhaustive with no fallback arm, so adding an action without
/// a transition is a compile error rather than a silent no-op.
///
/// # Example
///
/// ```rust
/// use tinyhouse_client::graphql::{reduce, Action, OperationState};
///
/// let state = reduce(OperationState::idle(), Action::Fetch);
/// assert!(state.loading);
///
/// let state = reduce(state, Action::FetchSuccess(vec!["cabin"]));
/// assert_eq!(state.data, Some(vec!["cabin"]));
/// assert!(!state.loading && !state.error);
/// ```
#[must_use]
pub fn reduce<D>(state: OperationState<D>, action: Action<D>) -> OperationState<D> {
    let next = match action {
        Action::Fetch => OperationState {
            data: state.data,
            loading: true,
            error: false,
        },
        Action::FetchSuccess(payload) => OperationState {
            data: Some(payload),
            loading: false,
            error: false,
        },
        Action::FetchError => OperationState {
            data: state.data,
            loading: false,
            error: true,
        },
    };
    debug_assert!(
        !(next.loading && next.error),
        "operation state cannot be loading and failed at once"
    );
    next
}
