//! Event log API routes
//!
//! This module wires up the event logs domain to HTTP routes.

use axum::Router;
use domain_event_logs::{EventLogService, MongoEventLogRepository};

use crate::state::AppState;

/// Create the event log router over the configured collection
pub fn router(state: &AppState) -> Router {
    let repository =
        MongoEventLogRepository::with_collection(&state.db, state.config.mongodb.collection());

    let service = EventLogService::new(repository);

    domain_event_logs::router(service)
}
