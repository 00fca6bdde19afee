//! # Generic Messages
//!
//! Requests sent from a `ResourceClient` to its `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor against every stored document.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to document-store operations: the CRUD set, a custom
/// `Action` for resource-specific logic, and `Find` for predicate queries.
/// Every variant is generic over `T: ActorEntity`, so a product payload can never
/// reach the user collection.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Find {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
}
