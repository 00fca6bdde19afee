//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each client turns framework errors back into its collection's error enum and
//! offers domain operations (`reserve`, `cancel_order`, `login`, ...) instead of
//! raw requests.

pub mod actor_client;
pub mod order_client;
pub mod pagination;
pub mod product_client;
pub mod user_client;

pub use actor_client::*;
pub use order_client::*;
pub use pagination::*;
pub use product_client::*;
pub use user_client::*;
