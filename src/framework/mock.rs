//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. It makes the logic
//! *around* a client (the order lifecycle calling the catalog, for example) testable
//! without spawning the dependency, and makes failures easy to inject.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! 1. **Client logic test**: a domain client over a `MockClient`.
//! 2. **Single actor test**: spawn one `ResourceActor` with `()` context.
//! 3. **Actor with mocked dependencies**: a real order actor whose product client is
//!    a mock (see `tests/order_actor_test.rs`).
//! 4. **Full system**: [`ShopSystem`](crate::lifecycle::ShopSystem) with every actor
//!    running (see `tests/integration_test.rs`).
//!
//! ```rust
//! use actor_shop::framework::mock::MockClient;
//! use actor_shop::framework::FrameworkError;
//! use actor_shop::model::{Product, ProductId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Product>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get(ProductId(1)).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(ProductId(1)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Use [`create_mock_client`] with [`expect_create`], [`expect_get`] or
//! [`expect_action`] when the test needs to inspect the request payload itself.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to send back.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Find {
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("mock expectation queue poisoned")
        .push_back(expectation);
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered, and ids
/// must match. A mismatch panics inside the mock task, which the caller observes
/// as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Find { respond_to, .. },
                        Some(Expectation::Find { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `find` operation.
    pub fn expect_find(&mut self) -> FindExpectationBuilder<T> {
        FindExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every registered expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        push(&self.expectations, Expectation::Get { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Get { id: self.id, response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        push(&self.expectations, Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Create { response: Err(error) });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        push(&self.expectations, Expectation::Update { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Update { id: self.id, response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.expectations, Expectation::Action { id: self.id, response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Action { id: self.id, response: Err(error) });
    }
}

/// Builder for `find` expectations. The filter is not evaluated; the canned
/// documents are returned as-is.
pub struct FindExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> FindExpectationBuilder<T> {
    pub fn return_ok(self, documents: Vec<T>) {
        push(&self.expectations, Expectation::Find { response: Ok(documents) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Find { response: Err(error) });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// The test plays the actor: it pulls requests off `receiver` with the helpers
/// below, asserts on them, and answers through the one-shot sender.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    tokio::sync::oneshot::Sender<Result<Option<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
