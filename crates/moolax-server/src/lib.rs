//! Moolax Gateway: an edge caching proxy for foreign-exchange rates.
//!
//! Serves a single authenticated read endpoint and shields a rate-limited
//! third-party provider behind three cache tiers of increasing durability
//! and decreasing speed: process memory, a shared Redis cache, and a
//! durable PostgreSQL store.

pub mod auth;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod resolver;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use server::{MoolaxServer, ServerBuilder, build_app};
pub use state::AppState;
