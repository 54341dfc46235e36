//! # Mock Framework & Testing Guide
//!
//! `MockService<S>` hands out a real `ServiceClient<S>` whose requests are answered from a
//! queue of expectations instead of a running service. Code under test (a typed client, or
//! a service that calls other services) cannot tell the difference.
//!
//! ## When to use Mocks vs Real Services
//!
//! | Feature | MockService | Real Service |
//! |---------|-------------|--------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real repositories and stores |
//! | **Use Case** | Isolating a service from its collaborators | Testing the service itself or the full system |
//! | **Error Injection** | Easy (`return_err`, `drop_reply`, `hang`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use service_framework::mock::MockService;
//! use service_framework::{RpcError, RpcService};
//!
//! struct Accounts;
//! #[derive(Debug, thiserror::Error)]
//! #[error("no such account")]
//! struct NotFound;
//!
//! #[async_trait]
//! impl RpcService for Accounts {
//!     type Request = String;
//!     type Response = String;
//!     type Error = NotFound;
//!     type Context = ();
//!     async fn handle(&self, r: String, _: &()) -> Result<String, NotFound> { Ok(r) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockService::<Accounts>::new();
//!     mock.expect_call().with(|id| id == "a1").return_ok("Alice".to_string());
//!     mock.expect_call().return_err(NotFound);
//!
//!     let client = mock.client();
//!     assert_eq!(client.call("a1".to_string()).await.unwrap(), "Alice");
//!     assert!(matches!(
//!         client.call("a2".to_string()).await,
//!         Err(RpcError::Service(NotFound))
//!     ));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Simulating Transport Failures
//!
//! - [`CallExpectationBuilder::drop_reply`] drops the reply channel: the caller sees
//!   `RpcError::Dropped`.
//! - [`CallExpectationBuilder::hang`] never answers. Combine with a client deadline to
//!   exercise `RpcError::DeadlineExceeded`; [`MockService::abandoned`] then reports how many
//!   hung calls were given up by their callers.
//!
//! ## Hand-driven Tests
//!
//! Use [`create_mock_client`] and [`next_request`] to receive envelopes yourself and reply
//! at exactly the moment a test needs.

use crate::client::ServiceClient;
use crate::message::{Envelope, Reply};
use crate::service::RpcService;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

type Matcher<S> = Box<dyn Fn(&<S as RpcService>::Request) -> bool + Send>;

/// How an expectation answers its call.
enum Answer<S: RpcService> {
    Respond(Result<S::Response, S::Error>),
    DropReply,
    Hang,
}

/// One expected call, consumed in FIFO order.
struct Expectation<S: RpcService> {
    matcher: Option<Matcher<S>>,
    answer: Answer<S>,
}

struct MockState<S: RpcService> {
    expectations: VecDeque<Expectation<S>>,
    received: Vec<S::Request>,
    failures: Vec<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock service with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut catalog = MockService::<CatalogService>::new();
/// catalog
///     .expect_call()
///     .with(|r| matches!(r, CatalogRequest::GetProducts(ProductQuery::ByIds { .. })))
///     .return_ok(CatalogResponse::Products(vec![widget]));
///
/// let client = CatalogClient::new(catalog.client());
/// // Use client in tests...
/// catalog.verify(); // Ensures all expectations were met
/// ```
pub struct MockService<S: RpcService> {
    client: ServiceClient<S>,
    state: Arc<Mutex<MockState<S>>>,
    abandoned: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: RpcService> Default for MockService<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RpcService> MockService<S> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Envelope<S>>(100);
        let state = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            received: Vec::new(),
            failures: Vec::new(),
        }));
        let abandoned = Arc::new(AtomicUsize::new(0));

        let task_state = Arc::clone(&state);
        let task_abandoned = Arc::clone(&abandoned);
        let handle = tokio::spawn(async move {
            while let Some(Envelope {
                request,
                respond_to,
            }) = receiver.recv().await
            {
                let answer = {
                    let mut state = lock(&task_state);
                    let answer = match state.expectations.pop_front() {
                        None => {
                            state
                                .failures
                                .push(format!("unexpected request: {request:?}"));
                            None
                        }
                        Some(exp) if exp.matcher.as_ref().is_some_and(|m| !m(&request)) => {
                            state
                                .failures
                                .push(format!("request did not match expectation: {request:?}"));
                            None
                        }
                        Some(exp) => Some(exp.answer),
                    };
                    state.received.push(request);
                    answer
                };

                match answer {
                    Some(Answer::Respond(result)) => {
                        let _ = respond_to.send(result);
                    }
                    Some(Answer::Hang) => {
                        let abandoned = Arc::clone(&task_abandoned);
                        tokio::spawn(park::<S>(respond_to, abandoned));
                    }
                    Some(Answer::DropReply) | None => drop(respond_to),
                }
            }
        });

        Self {
            client: ServiceClient::new(sender),
            state,
            abandoned,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ServiceClient<S> {
        self.client.clone()
    }

    /// Queues the next expected call.
    pub fn expect_call(&mut self) -> CallExpectationBuilder<S> {
        CallExpectationBuilder {
            matcher: None,
            state: Arc::clone(&self.state),
        }
    }

    /// Number of requests received so far, matched or not.
    pub fn received(&self) -> usize {
        lock(&self.state).received.len()
    }

    /// Drains the requests received so far, in arrival order.
    pub fn take_requests(&self) -> Vec<S::Request> {
        std::mem::take(&mut lock(&self.state).received)
    }

    /// How many `hang` expectations were abandoned by their callers.
    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met and no unexpected call arrived.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.failures.is_empty() {
            panic!("Mock received bad calls: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

async fn park<S: RpcService>(mut respond_to: Reply<S>, abandoned: Arc<AtomicUsize>) {
    respond_to.closed().await;
    abandoned.fetch_add(1, Ordering::SeqCst);
}

/// Builder for a queued call expectation.
pub struct CallExpectationBuilder<S: RpcService> {
    matcher: Option<Matcher<S>>,
    state: Arc<Mutex<MockState<S>>>,
}

impl<S: RpcService> CallExpectationBuilder<S> {
    /// Only accept a request for which `matcher` returns true.
    pub fn with(mut self, matcher: impl Fn(&S::Request) -> bool + Send + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Answer with a successful response.
    pub fn return_ok(self, response: S::Response) {
        self.push(Answer::Respond(Ok(response)));
    }

    /// Answer with the service's own error.
    pub fn return_err(self, error: S::Error) {
        self.push(Answer::Respond(Err(error)));
    }

    /// Drop the reply channel without answering.
    pub fn drop_reply(self) {
        self.push(Answer::DropReply);
    }

    /// Never answer; the call only ends when the caller gives up.
    pub fn hang(self) {
        self.push(Answer::Hang);
    }

    fn push(self, answer: Answer<S>) {
        lock(&self.state).expectations.push_back(Expectation {
            matcher: self.matcher,
            answer,
        });
    }
}

/// Creates a client and the receiver its envelopes arrive on.
///
/// # Testing Strategy
/// When a test needs to control *when* a reply is sent (or inspect the request before
/// answering), skip `MockService` and take the envelopes directly.
pub fn create_mock_client<S: RpcService>(
    buffer_size: usize,
) -> (ServiceClient<S>, mpsc::Receiver<Envelope<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ServiceClient::new(sender), receiver)
}

/// Waits for the next envelope and splits it into request and reply channel.
pub async fn next_request<S: RpcService>(
    receiver: &mut mpsc::Receiver<Envelope<S>>,
) -> Option<(S::Request, Reply<S>)> {
    receiver
        .recv()
        .await
        .map(|envelope| (envelope.request, envelope.respond_to))
}
