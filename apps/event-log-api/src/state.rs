//! Application state management.
//!
//! Holds the configuration and the MongoDB handles resolved at startup.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the MongoDB client and database share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database holding the event log collection
    pub db: Database,
}
