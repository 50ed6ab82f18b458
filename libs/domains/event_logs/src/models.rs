//! Event log domain models

use mongodb::bson::{self, Bson, Document, oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

/// A single recorded client event.
///
/// `id` is assigned by the server at creation and rendered as a 24-char hex
/// string in JSON. `created` and `event_name` are opaque strings;
/// `event_details` is stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventLog {
    #[serde(
        serialize_with = "serialize_object_id_as_hex_string",
        deserialize_with = "deserialize_object_id"
    )]
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,
    #[schema(example = "2024-01-15T10:00:00Z")]
    pub created: String,
    #[schema(example = "login")]
    pub event_name: String,
    #[schema(value_type = Object)]
    pub event_details: Map<String, Value>,
}

/// Inbound payload for `POST /event/submit`.
///
/// Fields are optional at the type level so that a missing field is reported
/// as a validation failure rather than a malformed body. Any `id` sent by the
/// client is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateEventLog {
    #[validate(required, length(min = 1))]
    pub created: Option<String>,

    #[validate(required, length(min = 1))]
    pub event_name: Option<String>,

    #[validate(required)]
    #[schema(value_type = Object)]
    pub event_details: Option<Map<String, Value>>,
}

impl CreateEventLog {
    /// Build the record to persist under a freshly generated id.
    ///
    /// Returns `None` if a required field is missing; call after validation.
    pub fn into_event_log(self) -> Option<EventLog> {
        Some(EventLog {
            id: ObjectId::new(),
            created: self.created?,
            event_name: self.event_name?,
            event_details: self.event_details?,
        })
    }
}

/// Acknowledgement returned by a successful insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsertAck {
    #[serde(
        rename = "InsertedID",
        serialize_with = "serialize_object_id_as_hex_string",
        deserialize_with = "deserialize_object_id"
    )]
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub inserted_id: ObjectId,
}

/// Accepts a BSON ObjectId (store reads) or a hex string (JSON).
fn deserialize_object_id<'de, D>(deserializer: D) -> Result<ObjectId, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::ObjectId(oid) => Ok(oid),
        Bson::String(hex) => ObjectId::parse_str(&hex).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected an ObjectId, found {:?}",
            other.element_type()
        ))),
    }
}

/// Document layout written to the collection. `_id` mirrors `id`.
#[derive(Debug, Serialize)]
pub(crate) struct StoredEventLog<'a> {
    #[serde(rename = "_id")]
    pub object_id: ObjectId,
    pub id: ObjectId,
    pub created: &'a str,
    pub event_name: &'a str,
    pub event_details: Document,
}

impl<'a> From<&'a EventLog> for StoredEventLog<'a> {
    fn from(event_log: &'a EventLog) -> Self {
        Self {
            object_id: event_log.id,
            id: event_log.id,
            created: &event_log.created,
            event_name: &event_log.event_name,
            event_details: details_to_document(&event_log.event_details),
        }
    }
}

impl StoredEventLog<'_> {
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

fn details_to_document(details: &Map<String, Value>) -> Document {
    details
        .iter()
        .map(|(key, value)| (key.clone(), json_to_bson(value)))
        .collect()
}

/// Integers outside the `i64` range are stored as doubles.
fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(details_to_document(map)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    fn sample() -> EventLog {
        EventLog {
            id: ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap(),
            created: "2024-01-15T10:00:00Z".to_string(),
            event_name: "login".to_string(),
            event_details: json!({"user": "alice"}).as_object().unwrap().clone(),
        }
    }

    #[test]
    fn test_event_log_json_uses_hex_id() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "created": "2024-01-15T10:00:00Z",
                "event_name": "login",
                "event_details": {"user": "alice"}
            })
        );
    }

    #[test]
    fn test_event_log_decodes_from_stored_document() {
        let event_log = sample();
        let document = StoredEventLog::from(&event_log).to_document().unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), event_log.id);
        assert_eq!(document.get_object_id("id").unwrap(), event_log.id);

        let decoded: EventLog = bson::from_document(document).unwrap();
        assert_eq!(decoded, event_log);
    }

    #[test]
    fn test_large_unsigned_detail_is_stored_as_double() {
        let mut event_log = sample();
        event_log.event_details = json!({
            "n": 18446744073709551615u64,
            "nested": {"small": 7, "ratio": 0.5, "tags": ["a", null, true]}
        })
        .as_object()
        .unwrap()
        .clone();

        let document = StoredEventLog::from(&event_log).to_document().unwrap();
        let details = document.get_document("event_details").unwrap();
        assert_eq!(details.get_f64("n").unwrap(), u64::MAX as f64);

        let nested = details.get_document("nested").unwrap();
        assert_eq!(nested.get_i64("small").unwrap(), 7);
        assert_eq!(nested.get_f64("ratio").unwrap(), 0.5);
        assert_eq!(nested.get_array("tags").unwrap().len(), 3);

        let decoded: EventLog = bson::from_document(document).unwrap();
        assert_eq!(decoded.event_details["n"].as_f64(), Some(u64::MAX as f64));
        assert_eq!(decoded.event_details["nested"]["small"], 7);
    }

    #[test]
    fn test_decode_rejects_non_mapping_details() {
        let document = doc! {
            "_id": ObjectId::new(),
            "id": ObjectId::new(),
            "created": "t",
            "event_name": "n",
            "event_details": "not a mapping",
        };
        assert!(bson::from_document::<EventLog>(document).is_err());
    }

    #[test]
    fn test_create_payload_ignores_client_id() {
        let payload: CreateEventLog = serde_json::from_value(json!({
            "id": "000000000000000000000000",
            "created": "t",
            "event_name": "n",
            "event_details": {}
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let event_log = payload.into_event_log().unwrap();
        assert_ne!(event_log.id.to_hex(), "000000000000000000000000");
    }

    #[test]
    fn test_create_payload_missing_fields_fail_validation() {
        let payload: CreateEventLog = serde_json::from_value(json!({
            "created": "",
            "event_details": null
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("created"));
        assert!(fields.contains_key("event_name"));
        assert!(fields.contains_key("event_details"));
    }

    #[test]
    fn test_insert_ack_shape() {
        let ack = InsertAck {
            inserted_id: ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&ack).unwrap(),
            json!({"InsertedID": "65a1f0c2e4b0a1b2c3d4e5f6"})
        );
    }
}
