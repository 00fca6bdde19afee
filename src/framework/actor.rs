//! # Generic Actor Server
//!
//! `ResourceActor` owns one collection of documents and processes requests for it
//! sequentially. This is the whole persistence layer: a single message is atomic
//! with respect to the collection, and nothing spans more than one message.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the "server" half: it owns the `store` and the receiving end of the
/// channel. Each actor runs in its own Tokio task and handles one message at a
/// time, so the store needs no lock.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` and its `client`.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Operations
///
/// * **Create**: allocate the next ID, build the entity, run `on_create`, reject on
///   unique-key conflict, insert.
/// * **Get**: clone of the stored document, or `None`.
/// * **Update** / **Action**: run the hook on a working copy; commit the copy only
///   when the hook succeeds and no conflict is found.
/// * **Delete**: run `on_delete`, remove.
/// * **Find**: clones of every document matching the filter.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it
    /// is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Returns the reason `candidate` cannot be stored next to the other documents.
    fn find_conflict(&self, id: &T::Id, candidate: &T) -> Option<String> {
        self.store
            .iter()
            .filter(|(other_id, _)| *other_id != id)
            .find_map(|(_, other)| candidate.conflicts_with(other))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(reason) = self.find_conflict(&id, &item) {
                        warn!(entity_type, %reason, "Create conflict");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(reason)));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(mut working) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = working.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(reason) = self.find_conflict(&id, &working) {
                        warn!(entity_type, %id, %reason, "Update conflict");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(reason)));
                        continue;
                    }
                    self.store.insert(id.clone(), working.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(working));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(mut working) = self.store.get(&id).cloned() else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    match working.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), working);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Find { filter, respond_to } => {
                    let matches: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter(*item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = matches.len(), "Find");
                    let _ = respond_to.send(Ok(matches));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
