//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber: compact `fmt` output,
//! module paths hidden (`with_target(false)`), level filtering from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and final collection size
//! - **Entity Operations**: Create, Get, Update, Delete, Find and custom Actions,
//!   each tagged with `entity_type` and the document id
//! - **Client Calls**: `#[instrument]` spans around every domain client method
//! - **HTTP**: one span per request from `tower_http::trace::TraceLayer`
//!
//! Password hashes and secrets are never recorded: `User`, `UserCreate` and
//! `Registration` have redacting `Debug` impls and the config keeps secrets in
//! `SecretString`.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default: info for this crate and the HTTP layer
//! cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=actor_shop=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Placing a two-unit order for a product with two in stock, at `info`:
//!
//! ```text
//! INFO Created entity_type="User" id=user_1 size=1
//! INFO Created entity_type="Product" id=product_1 size=1
//! INFO create_order{user_id=user_1 lines=1}: Action ok entity_type="Product" id=product_1
//! INFO create_order{user_id=user_1 lines=1}: Created entity_type="Order" id=order_1 size=1
//! INFO create_order{user_id=user_1 lines=1}: Order placed id=order_1 total=20.0
//! ```
//!
//! The product `Action ok` line is logged while the order actor is still inside
//! `Order::on_create`; the order is stored only after every line is reserved.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "actor_shop=info,tower_http=info";

pub fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Module paths add noise; actors log entity_type instead
        .compact()
        .init();
}
