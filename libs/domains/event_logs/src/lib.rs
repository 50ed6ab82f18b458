//! Event Logs Domain
//!
//! Stores client-submitted event records in MongoDB and serves them back,
//! one by id or all at once. Every response uses the
//! [`axum_helpers::Envelope`] shape.
//!
//! ```text
//! POST /event/submit ──► EventLogService::create ──► insert_one
//! GET  /data         ──► EventLogService::get_one ──► find_one {id}
//! GET  /alldata      ──► EventLogService::get_all ──► find {}
//! ```

mod error;
mod handlers;
mod models;
mod mongodb;
mod repository;
mod service;

pub use error::{EventLogError, Result};
pub use handlers::{ApiDoc, EventLogQuery, router};
pub use models::{CreateEventLog, EventLog, InsertAck};
pub use self::mongodb::{MongoEventLogRepository, STORE_TIMEOUT};
pub use repository::{EventLogRepository, InMemoryEventLogRepository};
pub use service::EventLogService;
