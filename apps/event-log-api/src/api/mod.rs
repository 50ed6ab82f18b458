//! API routes module
//!
//! Wires the event log domain and the readiness probe into one router.

pub mod event_logs;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes, served at the root
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(event_logs::router(state))
        .merge(health::router(state.clone()))
}
