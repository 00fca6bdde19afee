//! # User Actor
//!
//! Owns the user collection: registration, profile updates and login
//! bookkeeping. It has no dependencies (`Context = ()`) and no custom actions.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and its generic client
//!
//! Unique usernames and emails are enforced by the actor through
//! [`ActorEntity::conflicts_with`](crate::framework::ActorEntity::conflicts_with).
//!
//! ## Usage
//!
//! ```rust
//! use actor_shop::user_actor;
//! use actor_shop::clients::UserClient;
//! use actor_shop::credentials::PasswordHasherConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = user_actor::new(32);
//!     let client = UserClient::new(generic_client, PasswordHasherConfig::default());
//!
//!     // Start the actor (no dependencies, so context is ())
//!     tokio::spawn(actor.run(()));
//!
//!     let user = client
//!         .register(user_actor::Registration {
//!             username: "alice".into(),
//!             password: "pw123".into(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     assert_eq!(user.username, "alice");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::User;

/// Input for registering a new account, before the password is hashed.
#[derive(Clone, Default)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(buffer_size)
}
