//! # ActorEntity Trait
//!
//! The contract every stored document type (User, Product, Order) implements so the
//! generic [`ResourceActor`](crate::framework::ResourceActor) can own a collection of it.
//!
//! Associated types pin each collection to its own payloads: a `User` collection only
//! accepts `UserCreate`, a `Product` collection only accepts `ProductAction`, and so on.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::conflicts_with`]
//!
//! The defaults do nothing (`Ok(())` / `None`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document type must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so an entity can call other actors while it is being written
/// (an order reserving stock, for example). The `Context` type carries those
/// dependencies and is handed to `run()` rather than `new()`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Document identifier. Must be convertible from u32 for sequential ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new document.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing document.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations beyond CRUD (e.g. `AdjustQuantity`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per collection.
    ///
    /// Errors cross the actor boundary boxed inside
    /// [`FrameworkError::EntityError`](crate::framework::FrameworkError::EntityError);
    /// domain clients downcast them back to this type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full document from the ID and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the document is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called with a working copy of the stored document. The copy replaces the
    /// stored document only if this returns `Ok`.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a resource-specific action on a working copy of the document.
    /// The copy is committed only when the action succeeds.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Unique Keys ---

    /// Reports why `self` may not coexist with `other` in the same collection.
    ///
    /// The actor checks every other stored document before committing a create or
    /// an update, which is how unique fields (usernames, emails) are enforced.
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }
}
