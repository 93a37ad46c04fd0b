//! Integration tests for `QueryController`.

mod common;

use std::time::Duration;

use common::{listings_envelope, yield_until, GatedTransport, Reply, StubTransport};
use serde_json::json;
use tinyhouse_client::graphql::{Operation, OperationState, QueryController};
use tinyhouse_client::listings::{listings_query, ListingsData};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_query_starts_loading_then_settles_with_data() {
    let transport = StubTransport::always(json!({ "data": { "listings": [] } }));
    let query: QueryController<ListingsData> =
        QueryController::new(transport.clone(), listings_query());

    assert_eq!(query.state(), OperationState::loading());

    let state = query.settled().await;
    assert_eq!(
        state,
        OperationState {
            data: Some(ListingsData { listings: vec![] }),
            loading: false,
            error: false,
        }
    );
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_query_with_application_error_flags_error_and_keeps_no_data() {
    let transport = StubTransport::always(json!({ "data": null, "errors": [{ "message": "boom" }] }));
    let query: QueryController<ListingsData> = QueryController::new(transport, listings_query());

    let state = query.settled().await;
    assert_eq!(
        state,
        OperationState {
            data: None,
            loading: false,
            error: true,
        }
    );
}

#[tokio::test]
async fn test_query_with_transport_failure_flags_error() {
    let transport = StubTransport::status(500);
    let query: QueryController<ListingsData> = QueryController::new(transport, listings_query());

    let state = query.settled().await;
    assert!(state.error);
    assert!(!state.loading);
    assert!(state.data.is_none());
}

#[tokio::test]
async fn test_refetch_recovers_from_error() {
    let transport = StubTransport::sequence(vec![
        Reply::Status(500),
        Reply::Envelope(listings_envelope(&["Cozy cabin"])),
    ]);
    let query: QueryController<ListingsData> =
        QueryController::new(transport.clone(), listings_query());
    assert!(query.settled().await.error);

    let data = assert_ok!(query.refetch().await);

    assert_eq!(data.listings.len(), 1);
    assert_eq!(data.listings[0].title, "Cozy cabin");
    assert!(!query.error());
    assert_eq!(query.data(), Some(data));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_failed_refetch_keeps_previous_data() {
    let transport = StubTransport::sequence(vec![
        Reply::Envelope(listings_envelope(&["A", "B"])),
        Reply::Envelope(json!({ "errors": [{ "message": "boom" }] })),
    ]);
    let query: QueryController<ListingsData> = QueryController::new(transport, listings_query());
    query.settled().await;

    let error = assert_err!(query.refetch().await);

    assert_eq!(error.to_string(), "boom");
    let state = query.state();
    assert!(state.error);
    assert_eq!(state.data.map(|d| d.listings.len()), Some(2));
}

#[tokio::test]
async fn test_refetch_keeps_stale_data_while_loading() {
    let (transport, gates) = GatedTransport::new(2);
    let mut gates = gates.into_iter();
    let query: QueryController<ListingsData> =
        QueryController::new(transport.clone(), listings_query());

    yield_until(|| transport.started() == 1).await;
    gates
        .next()
        .unwrap()
        .send(Reply::Envelope(listings_envelope(&["First"])))
        .unwrap();
    query.settled().await;

    let handle = query.spawn_refetch();
    let state = query.state();
    assert!(state.loading);
    assert!(!state.error);
    assert_eq!(state.data.unwrap().listings[0].title, "First");

    yield_until(|| transport.started() == 2).await;
    gates
        .next()
        .unwrap()
        .send(Reply::Envelope(listings_envelope(&["Second"])))
        .unwrap();
    handle.await.unwrap();

    assert_eq!(query.data().unwrap().listings[0].title, "Second");
    assert!(!query.loading());
}

#[tokio::test]
async fn test_newest_refetch_wins_when_older_settles_last() {
    let (transport, gates) = GatedTransport::new(3);
    let mut gates = gates.into_iter();
    let initial = gates.next().unwrap();
    let older = gates.next().unwrap();
    let newer = gates.next().unwrap();

    let query: QueryController<serde_json::Value> =
        QueryController::new(transport.clone(), Operation::new("query { n }"));
    yield_until(|| transport.started() == 1).await;
    initial
        .send(Reply::Envelope(json!({ "data": { "n": 0 } })))
        .unwrap();
    query.settled().await;

    let release = async {
        yield_until(|| transport.started() == 3).await;
        newer
            .send(Reply::Envelope(json!({ "data": { "n": 2 } })))
            .unwrap();
        yield_until(|| transport.completed() == 2).await;
        older
            .send(Reply::Envelope(json!({ "data": { "n": 1 } })))
            .unwrap();
    };

    let (first, second, ()) = tokio::join!(query.refetch(), query.refetch(), release);

    // Each caller still gets its own attempt's result.
    assert_eq!(assert_ok!(first), json!({ "n": 1 }));
    assert_eq!(assert_ok!(second), json!({ "n": 2 }));
    assert_eq!(
        query.state(),
        OperationState {
            data: Some(json!({ "n": 2 })),
            loading: false,
            error: false,
        }
    );
}

#[tokio::test]
async fn test_stale_failure_does_not_flag_error() {
    let (transport, gates) = GatedTransport::new(3);
    let mut gates = gates.into_iter();
    let initial = gates.next().unwrap();
    let older = gates.next().unwrap();
    let newer = gates.next().unwrap();

    let query: QueryController<serde_json::Value> =
        QueryController::new(transport.clone(), Operation::new("query { n }"));
    yield_until(|| transport.started() == 1).await;
    initial
        .send(Reply::Envelope(json!({ "data": { "n": 0 } })))
        .unwrap();
    query.settled().await;

    let release = async {
        yield_until(|| transport.started() == 3).await;
        newer
            .send(Reply::Envelope(json!({ "data": { "n": 2 } })))
            .unwrap();
        yield_until(|| transport.completed() == 2).await;
        older.send(Reply::Status(503)).unwrap();
    };

    let (first, second, ()) = tokio::join!(query.refetch(), query.refetch(), release);

    assert!(assert_err!(first).is_transport());
    assert_ok!(second);
    assert!(!query.error());
    assert_eq!(query.data(), Some(json!({ "n": 2 })));
}

#[tokio::test]
async fn test_abandoned_refetch_settles_as_failed() {
    let (transport, gates) = GatedTransport::new(3);
    let mut gates = gates.into_iter();
    let initial = gates.next().unwrap();
    let _never_released = gates.next().unwrap();
    let retry = gates.next().unwrap();

    let query: QueryController<serde_json::Value> =
        QueryController::new(transport.clone(), Operation::new("query { n }"));
    yield_until(|| transport.started() == 1).await;
    initial
        .send(Reply::Envelope(json!({ "data": { "n": 0 } })))
        .unwrap();
    query.settled().await;

    assert_err!(tokio::time::timeout(Duration::from_millis(20), query.refetch()).await);

    assert_eq!(
        query.state(),
        OperationState {
            data: Some(json!({ "n": 0 })),
            loading: false,
            error: true,
        }
    );
    assert!(query.settled().await.error);

    // The next attempt runs normally.
    retry
        .send(Reply::Envelope(json!({ "data": { "n": 1 } })))
        .unwrap();
    assert_eq!(assert_ok!(query.refetch().await), json!({ "n": 1 }));
    assert!(!query.error());
}

#[tokio::test]
async fn test_dropped_controller_is_never_settled() {
    let (transport, gates) = GatedTransport::new(1);
    let query: QueryController<ListingsData> =
        QueryController::new(transport.clone(), listings_query());
    let rx = query.subscribe();

    yield_until(|| transport.started() == 1).await;
    drop(query);

    for gate in gates {
        gate.send(Reply::Envelope(listings_envelope(&["Late"])))
            .unwrap();
    }
    yield_until(|| transport.completed() == 1).await;
    tokio::task::yield_now().await;

    let last = rx.borrow().clone();
    assert_eq!(last, OperationState::loading());
}

#[tokio::test]
async fn test_changing_variables_reruns_query() {
    let transport = StubTransport::new(|request, _| {
        let id = request
            .variables
            .as_ref()
            .and_then(|v| v.get("id"))
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        Reply::Envelope(json!({ "data": { "listing": { "id": id } } }))
    });
    let text = "query Listing($id: ID!) { listing(id: $id) { id } }";
    let mut query: QueryController<serde_json::Value> = QueryController::new(
        transport.clone(),
        Operation::with_variables(text, json!({ "id": "1" })),
    );
    query.settled().await;

    assert!(!query.set_operation(Operation::with_variables(text, json!({ "id": "1" }))));
    assert!(query.set_operation(Operation::with_variables(text, json!({ "id": "2" }))));

    let state = query.settled().await;
    assert_eq!(state.data, Some(json!({ "listing": { "id": "2" } })));
    assert_eq!(transport.calls(), 2);
    assert_eq!(
        transport.requests()[1].variables,
        Some(json!({ "id": "2" }))
    );
}

#[tokio::test]
async fn test_subscribers_see_loading_then_error() {
    let (transport, gates) = GatedTransport::new(1);
    let query: QueryController<ListingsData> =
        QueryController::new(transport.clone(), listings_query());
    let mut rx = query.subscribe();
    assert!(rx.borrow_and_update().loading);

    yield_until(|| transport.started() == 1).await;
    for gate in gates {
        gate.send(Reply::Status(502)).unwrap();
    }

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert_eq!(
        state,
        OperationState {
            data: None,
            loading: false,
            error: true,
        }
    );
}
