//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic event log payloads (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let db = mongo.database("app");
//!     let payload = builder.payload("login");
//! }
//! ```

use serde_json::{Map, Value, json};

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event_log");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique collection name so tests sharing a server do not collide
    pub fn collection(&self) -> String {
        format!("behaviour_analysis_{}", self.seed)
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("event", "login"), "test-event-7-login");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// RFC 3339 timestamp derived from the seed; the minute varies with `n`
    pub fn created(&self, n: u32) -> String {
        format!("2024-01-15T10:{:02}:{:02}Z", n % 60, self.seed % 60)
    }

    /// Small details document tagged with the seed
    pub fn event_details(&self) -> Map<String, Value> {
        let mut details = Map::new();
        details.insert("seed".to_string(), json!(self.seed.to_string()));
        details.insert("source".to_string(), json!("test-utils"));
        details
    }

    /// Complete submit payload for an event called `event_name`
    pub fn payload(&self, event_name: &str) -> Value {
        json!({
            "created": self.created(0),
            "event_name": event_name,
            "event_details": self.event_details(),
        })
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that `value` is a 24-char lowercase hex id
    pub fn assert_hex_id(value: &Value, context: &str) {
        let id = value
            .as_str()
            .unwrap_or_else(|| panic!("{}: expected hex id string, got {}", context, value));
        assert!(
            id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "{}: expected 24-char hex id, got {:?}",
            context,
            id
        );
    }

    /// Assert the `{status, message, data: {data}}` envelope fields
    pub fn assert_envelope(body: &Value, status: u16, message: &str) {
        assert_eq!(body["status"], status, "envelope status in {}", body);
        assert_eq!(body["message"], message, "envelope message in {}", body);
        assert!(
            body["data"].get("data").is_some(),
            "envelope missing data.data in {}",
            body
        );
    }
}
