//! MongoDB connector and health probes

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_COLLECTION, DEFAULT_DATABASE, MongoConfig};
pub use connector::{MongoError, connect, connect_from_config};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
