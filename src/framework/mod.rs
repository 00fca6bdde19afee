//! Generic actor framework: the in-process document store.
//!
//! Each collection is one [`ResourceActor`] task owning a `HashMap` of documents.
//! Callers talk to it through a cloneable [`ResourceClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that document types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns one collection
//! - [`ResourceClient`] - Typed request/response handle to an actor
//! - [`FrameworkError`] - Store-level errors (closed actor, not found, conflict)
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Account {
        id: u32,
        handle: String,
        balance: u32,
    }

    #[derive(Debug)]
    struct AccountCreate {
        handle: String,
    }

    #[derive(Debug)]
    struct AccountUpdate {
        handle: String,
    }

    #[derive(Debug)]
    enum AccountAction {
        Deposit(u32),
        Withdraw(u32),
    }

    #[derive(Debug, thiserror::Error)]
    enum AccountError {
        #[error("insufficient funds")]
        InsufficientFunds,
    }

    #[async_trait]
    impl ActorEntity for Account {
        type Id = u32;
        type Create = AccountCreate;
        type Update = AccountUpdate;
        type Action = AccountAction;
        type ActionResult = u32;
        type Context = ();
        type Error = AccountError;

        fn from_create_params(id: u32, params: AccountCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                handle: params.handle,
                balance: 0,
            })
        }

        async fn on_update(&mut self, update: AccountUpdate, _: &()) -> Result<(), Self::Error> {
            self.handle = update.handle;
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: AccountAction,
            _: &(),
        ) -> Result<u32, Self::Error> {
            match action {
                AccountAction::Deposit(amount) => self.balance += amount,
                AccountAction::Withdraw(amount) => {
                    // Mutate first so the test proves failed actions are not committed.
                    self.balance = self.balance.wrapping_sub(amount);
                    if amount > self.balance.wrapping_add(amount) {
                        return Err(AccountError::InsufficientFunds);
                    }
                }
            }
            Ok(self.balance)
        }

        fn conflicts_with(&self, other: &Self) -> Option<String> {
            (self.handle == other.handle).then(|| format!("handle {} taken", self.handle))
        }
    }

    fn spawn_accounts() -> ResourceClient<Account> {
        let (actor, client) = ResourceActor::<Account>::new(8);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn create_rejects_unique_key_conflict() {
        let client = spawn_accounts();
        client
            .create(AccountCreate { handle: "alice".into() })
            .await
            .unwrap();

        let dup = client.create(AccountCreate { handle: "alice".into() }).await;
        assert!(matches!(dup, Err(FrameworkError::Conflict(_))));

        let all = client.find(|_| true).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn update_conflict_leaves_document_unchanged() {
        let client = spawn_accounts();
        let a = client.create(AccountCreate { handle: "a".into() }).await.unwrap();
        client.create(AccountCreate { handle: "b".into() }).await.unwrap();

        let result = client.update(a, AccountUpdate { handle: "b".into() }).await;
        assert!(matches!(result, Err(FrameworkError::Conflict(_))));
        assert_eq!(client.get(a).await.unwrap().unwrap().handle, "a");

        // Re-saving its own handle is not a conflict.
        let same = client.update(a, AccountUpdate { handle: "a".into() }).await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn failed_action_is_not_committed() {
        let client = spawn_accounts();
        let id = client.create(AccountCreate { handle: "c".into() }).await.unwrap();
        assert_eq!(client.perform_action(id, AccountAction::Deposit(5)).await.unwrap(), 5);

        let err = client
            .perform_action(id, AccountAction::Withdraw(9))
            .await
            .unwrap_err();
        assert!(matches!(
            err.into_entity_error::<AccountError>(),
            Ok(AccountError::InsufficientFunds)
        ));
        assert_eq!(client.get(id).await.unwrap().unwrap().balance, 5);
    }

    #[tokio::test]
    async fn find_filters_inside_the_actor() {
        let client = spawn_accounts();
        for handle in ["x1", "x2", "y1"] {
            client.create(AccountCreate { handle: handle.into() }).await.unwrap();
        }
        let xs = client.find(|a: &Account| a.handle.starts_with('x')).await.unwrap();
        assert_eq!(xs.len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_report_not_found() {
        let client = spawn_accounts();
        assert!(client.get(42).await.unwrap().is_none());
        assert!(matches!(
            client.perform_action(42, AccountAction::Deposit(1)).await,
            Err(FrameworkError::NotFound(_))
        ));
        assert!(matches!(client.delete(42).await, Err(FrameworkError::NotFound(_))));
    }
}
