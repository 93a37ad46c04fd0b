//! Test doubles for the [`Transport`] seam.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tinyhouse_client::graphql::{OperationRequest, ResultEnvelope, Transport, TransportError};
use tinyhouse_client::{HttpError, HttpResponseError};
use tokio::sync::oneshot;

/// What a stub answers to one request.
#[derive(Clone, Debug)]
pub enum Reply {
    /// A 2xx response carrying this envelope.
    Envelope(serde_json::Value),
    /// A non-2xx response with this status.
    Status(u16),
}

impl Reply {
    fn into_result(self) -> Result<ResultEnvelope, TransportError> {
        match self {
            Self::Envelope(value) => serde_json::from_value(value).map_err(TransportError::Decode),
            Self::Status(code) => Err(TransportError::Http(HttpError::Response(
                HttpResponseError {
                    code,
                    message: "stub failure".to_string(),
                    error_reference: None,
                },
            ))),
        }
    }
}

type Responder = dyn Fn(&OperationRequest, usize) -> Reply + Send + Sync;

/// Answers synchronously and records every request.
pub struct StubTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<OperationRequest>>,
}

impl StubTransport {
    /// Answers with the closure's reply; the second argument is the call index.
    pub fn new(
        responder: impl Fn(&OperationRequest, usize) -> Reply + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answers every request with the same envelope.
    pub fn always(envelope: serde_json::Value) -> Arc<Self> {
        Self::new(move |_, _| Reply::Envelope(envelope.clone()))
    }

    /// Answers every request with a non-2xx status.
    pub fn status(code: u16) -> Arc<Self> {
        Self::new(move |_, _| Reply::Status(code))
    }

    /// Answers the n-th request with the n-th reply, repeating the last one.
    pub fn sequence(replies: Vec<Reply>) -> Arc<Self> {
        assert!(!replies.is_empty(), "sequence needs at least one reply");
        Self::new(move |_, index| replies[index.min(replies.len() - 1)].clone())
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<OperationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: OperationRequest) -> Result<ResultEnvelope, TransportError> {
        let reply = {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len();
            requests.push(request.clone());
            (self.responder)(&request, index)
        };
        reply.into_result()
    }
}

/// Holds every request until the test releases its gate.
///
/// Requests take gates in the order they arrive.
pub struct GatedTransport {
    gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl GatedTransport {
    /// Creates a transport with `count` gates and returns their release handles.
    pub fn new(count: usize) -> (Arc<Self>, Vec<oneshot::Sender<Reply>>) {
        let mut senders = Vec::with_capacity(count);
        let mut receivers = VecDeque::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        let transport = Arc::new(Self {
            gates: Mutex::new(receivers),
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        });
        (transport, senders)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, _request: OperationRequest) -> Result<ResultEnvelope, TransportError> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .expect("no gate left for this request");
        self.started.fetch_add(1, Ordering::SeqCst);

        let reply = gate.await.expect("gate released without a reply");
        self.completed.fetch_add(1, Ordering::SeqCst);
        reply.into_result()
    }
}

/// Yields until `condition` holds, letting spawned attempts make progress.
pub async fn yield_until(condition: impl Fn() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

pub fn listings_envelope(titles: &[&str]) -> serde_json::Value {
    let listings: Vec<serde_json::Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            serde_json::json!({
                "id": format!("listing-{i}"),
                "title": title,
                "image": "https://example.com/listing.jpg",
                "address": "3210 Scotchmere Dr W, Toronto, ON, CA",
                "price": 10000,
                "numOfGuests": 2,
                "numOfBeds": 1,
                "numOfBaths": 1,
                "rating": 4.5
            })
        })
        .collect();
    serde_json::json!({ "data": { "listings": listings } })
}
