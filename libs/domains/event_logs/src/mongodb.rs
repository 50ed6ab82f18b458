//! MongoDB implementation of EventLogRepository

use crate::error::{EventLogError, Result};
use crate::models::{EventLog, StoredEventLog};
use crate::repository::EventLogRepository;
use async_trait::async_trait;
use database::mongodb::{Collection, DEFAULT_COLLECTION, Database};
use futures_util::TryStreamExt;
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use std::future::Future;
use std::time::Duration;
use tracing::{info, instrument};

/// Upper bound for a single store interaction.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// MongoDB-based event log repository
#[derive(Clone)]
pub struct MongoEventLogRepository {
    collection: Collection<Document>,
    timeout: Duration,
}

impl MongoEventLogRepository {
    /// Repository over the `behaviour_analysis` collection of `database`
    pub fn new(database: &Database) -> Self {
        Self::with_collection(database, DEFAULT_COLLECTION)
    }

    /// Repository over a custom collection name
    pub fn with_collection(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
            timeout: STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| EventLogError::Timeout {
                operation,
                after: self.timeout,
            })?
    }
}

#[async_trait]
impl EventLogRepository for MongoEventLogRepository {
    #[instrument(skip(self, event_log), fields(event_log_id = %event_log.id))]
    async fn insert(&self, event_log: EventLog) -> Result<ObjectId> {
        let document = StoredEventLog::from(&event_log).to_document()?;

        let result = self
            .bounded("insert", async {
                Ok::<_, EventLogError>(self.collection.insert_one(document).await?)
            })
            .await?;

        let id = result.inserted_id.as_object_id().unwrap_or(event_log.id);
        info!(event_log_id = %id, "Event log stored");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<EventLog>> {
        let document = self
            .bounded("find_by_id", async {
                Ok::<_, EventLogError>(self.collection.find_one(doc! { "id": id }).await?)
            })
            .await?;

        document
            .map(|document| bson::from_document(document).map_err(EventLogError::from))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<EventLog>> {
        self.bounded("find_all", async {
            let mut cursor = self.collection.find(doc! {}).await?;

            let mut records = Vec::new();
            while let Some(document) = cursor.try_next().await? {
                records.push(bson::from_document::<EventLog>(document)?);
            }
            Ok::<_, EventLogError>(records)
        })
        .await
    }
}
