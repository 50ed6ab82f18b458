//! Event log repository trait and in-memory implementation

use crate::error::Result;
use crate::models::EventLog;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Repository trait for event log storage
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Persist a new record, returning the id the store acknowledged
    async fn insert(&self, event_log: EventLog) -> Result<ObjectId>;

    /// Look up the record whose `id` equals `id`
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<EventLog>>;

    /// Every record, in store order
    async fn find_all(&self) -> Result<Vec<EventLog>>;
}

#[async_trait]
impl<R: EventLogRepository + ?Sized> EventLogRepository for Arc<R> {
    async fn insert(&self, event_log: EventLog) -> Result<ObjectId> {
        (**self).insert(event_log).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<EventLog>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<EventLog>> {
        (**self).find_all().await
    }
}

/// Non-persistent repository for tests and local runs without MongoDB.
#[derive(Default)]
pub struct InMemoryEventLogRepository {
    records: RwLock<Vec<EventLog>>,
}

impl InMemoryEventLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl EventLogRepository for InMemoryEventLogRepository {
    async fn insert(&self, event_log: EventLog) -> Result<ObjectId> {
        let id = event_log.id;
        self.records.write().await.push(event_log);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<EventLog>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<EventLog>> {
        Ok(self.records.read().await.clone())
    }
}
