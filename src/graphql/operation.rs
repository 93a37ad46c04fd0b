//! Operation descriptions and their wire representation.

use serde::Serialize;

use crate::graphql::TransportError;

/// An operation (query or mutation) plus optional typed variables.
///
/// An operation is immutable once constructed. Two operations have the same
/// identity when both their text and their variables are equal.
///
/// # Example
///
/// ```rust
/// use tinyhouse_client::graphql::Operation;
/// use serde_json::json;
///
/// let listings: Operation = Operation::new("query Listings { listings { id } }");
/// assert!(listings.variables().is_none());
///
/// let delete = Operation::with_variables(
///     "mutation DeleteListing($id: ID!) { deleteListing(id: $id) { id } }",
///     json!({ "id": "42" }),
/// );
/// assert_eq!(delete.variables().unwrap()["id"], "42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation<V = serde_json::Value> {
    text: String,
    variables: Option<V>,
}

impl<V> Operation<V> {
    /// Creates an operation without variables.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variables: None,
        }
    }

    /// Creates an operation carrying variables.
    #[must_use]
    pub fn with_variables(text: impl Into<String>, variables: V) -> Self {
        Self {
            text: text.into(),
            variables: Some(variables),
        }
    }

    /// Returns the operation text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the variables, if any.
    #[must_use]
    pub const fn variables(&self) -> Option<&V> {
        self.variables.as_ref()
    }
}

impl<V: Serialize> Operation<V> {
    /// Encodes the operation into the request body sent to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serialize`] when the variables cannot be
    /// represented as JSON.
    pub fn to_request(&self) -> Result<OperationRequest, TransportError> {
        let variables = self
            .variables
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(TransportError::Serialize)?;

        Ok(OperationRequest {
            query: self.text.clone(),
            variables,
        })
    }
}

/// The JSON body posted to the endpoint: `{ "query": ..., "variables"?: ... }`.
#[derive(Clone, Debug, PartialEq, Serialize, serde::Deserialize)]
pub struct OperationRequest {
    /// The operation text.
    pub query: String,
    /// The encoded variables; omitted from the body when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}
