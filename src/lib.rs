//! # Actor Shop
//!
//! > **An e-commerce backend built from resource-oriented actors.**
//!
//! Users, products and orders each live in their own actor: a Tokio task that
//! owns one collection and processes requests one at a time. The HTTP layer
//! never touches the collections directly; it talks to domain clients that
//! wrap the message passing.
//!
//! ## 🏗️ Design
//!
//! ### One Engine, Three Collections
//! `ResourceActor<T: ActorEntity>` is written once and drives every collection.
//! An entity supplies its validation (`from_create_params`), its write hooks
//! (`on_create`, `on_update`), its custom actions (`handle_action`) and its
//! unique keys (`conflicts_with`).
//!
//! ### Inventory Consistency
//! Checking and decrementing a product's stock is a single message to the
//! product actor, so quantity never goes negative. A multi-line order reserves
//! its lines one after another; a failure part way through leaves the earlier
//! lines reserved.
//!
//! ### Async Context Injection
//! Dependencies are injected at `run()` time. The order actor receives a
//! [`ProductClient`](clients::ProductClient) and calls it while creating and
//! cancelling orders.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: the generic actor, its client, errors and the `MockClient`
//!   test double.
//! - [`model`]: the documents and their payloads.
//! - [`user_actor`], [`product_actor`], [`order_actor`]: `ActorEntity`
//!   implementations and per-collection errors.
//! - [`clients`]: domain clients plus pagination.
//! - [`credentials`]: password hashing and session tokens.
//! - [`lifecycle`]: configuration, tracing, and starting/stopping the actors.
//! - [`api`]: axum routes, auth extractors and error rendering.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) RUST_LOG=info cargo run
//! ```

pub mod api;
pub mod clients;
pub mod credentials;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod user_actor;
