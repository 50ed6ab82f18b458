//! Event log domain error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::Envelope;
use mongodb::bson;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Result type for event log operations
pub type Result<T> = std::result::Result<T, EventLogError>;

/// Event log domain errors.
///
/// Clients see only two statuses: input problems are `400`, everything on the
/// store side is `500`. The finer split exists for logs.
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("event log not found: {id}")]
    NotFound { id: String },

    #[error("failed to decode event log: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("{operation} timed out after {}s", .after.as_secs())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl From<bson::ser::Error> for EventLogError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Database(err.into())
    }
}

impl EventLogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::Decode(_) | Self::Timeout { .. } | Self::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for EventLogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Event log request failed");
        } else {
            info!(error = %self, "Event log request rejected");
        }

        Envelope::error(status, self.to_string()).into_response()
    }
}
