//! Document-store connector for the event-log service.
//!
//! Owns the process-wide MongoDB client: building it from a connection
//! string, proving it is alive with a `ping`, and exposing health probes.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("app");
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
