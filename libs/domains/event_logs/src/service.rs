//! Event log service layer

use crate::error::{EventLogError, Result};
use crate::models::{CreateEventLog, EventLog, InsertAck};
use crate::repository::EventLogRepository;
use mongodb::bson::oid::ObjectId;
use tracing::{instrument, warn};
use validator::Validate;

/// Event log operations on top of a repository
pub struct EventLogService<R: EventLogRepository> {
    repository: R,
}

impl<R: EventLogRepository> EventLogService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Parse, validate and persist a raw JSON payload.
    ///
    /// Nothing reaches the store unless the payload parses and validates.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub async fn create(&self, payload: &[u8]) -> Result<InsertAck> {
        let create: CreateEventLog = serde_json::from_slice(payload)?;
        create.validate()?;

        let event_log = create
            .into_event_log()
            .ok_or_else(|| EventLogError::Validation(validator::ValidationErrors::new()))?;

        let inserted_id = self.repository.insert(event_log).await?;
        Ok(InsertAck { inserted_id })
    }

    /// Fetch one record by its hex id.
    ///
    /// An id that does not decode is logged and looked up as the zero id,
    /// which never matches a stored record.
    #[instrument(skip(self))]
    pub async fn get_one(&self, event_log_id: &str) -> Result<EventLog> {
        let id = ObjectId::parse_str(event_log_id).unwrap_or_else(|e| {
            warn!(event_log_id, error = %e, "Invalid event log id");
            ObjectId::from_bytes([0; 12])
        });

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventLogError::NotFound {
                id: event_log_id.to_string(),
            })
    }

    /// Every stored record. Empty when the collection is empty.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<EventLog>> {
        self.repository.find_all().await
    }
}
