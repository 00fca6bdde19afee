//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the actors, plus the process-level concerns
//! around them: configuration and tracing.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them at `run(context)`:
//!
//! ```rust,ignore
//! impl ActorEntity for User    { type Context = (); }
//! impl ActorEntity for Product { type Context = (); }
//! impl ActorEntity for Order   { type Context = ProductClient; }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors clean up** - Log final state
//! 4. **Await completion** - Wait for all actor tasks to finish
//!
//! The dependency graph is acyclic (orders → products), so channel closure is
//! enough: the order actor exits, releasing its product client, and then the
//! product actor exits.

pub mod config;
pub mod shop_system;
pub mod tracing;

pub use config::*;
pub use shop_system::*;
pub use self::tracing::*;
