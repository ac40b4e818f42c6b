//! Application state management.
//!
//! Handlers share no in-process mutable state; everything here is
//! configuration plus the MongoDB client, which is an inexpensive clone
//! over a shared connection pool.

use mongodb::{Client, Database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
