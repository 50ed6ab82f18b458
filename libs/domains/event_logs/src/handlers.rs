use axum::{
    Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::{get, post},
};
use axum_helpers::Envelope;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{instrument, warn};
use utoipa::{IntoParams, OpenApi};

use crate::error::EventLogError;
use crate::models::{CreateEventLog, EventLog, InsertAck};
use crate::repository::EventLogRepository;
use crate::service::EventLogService;

/// OpenAPI documentation for the event log API
#[derive(OpenApi)]
#[openapi(
    paths(get_event_log, get_event_log_by_path, list_event_logs, submit_event_log),
    components(schemas(EventLog, CreateEventLog, InsertAck)),
    tags(
        (name = "EventLogs", description = "Event log records (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the event log router with all HTTP endpoints
pub fn router<R: EventLogRepository + 'static>(service: EventLogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/data", get(get_event_log))
        .route("/data/{eventLogId}", get(get_event_log_by_path))
        .route("/alldata", get(list_event_logs))
        .route("/event/submit", post(submit_event_log))
        .with_state(shared_service)
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventLogQuery {
    /// 24-char hex id of the record
    #[serde(rename = "eventLogId", default)]
    pub event_log_id: String,
}

/// Fetch one event log by id
#[utoipa::path(
    get,
    path = "/data",
    tag = "EventLogs",
    params(EventLogQuery),
    responses(
        (status = 200, description = "Event log found", body = Envelope<EventLog>),
        (status = 500, description = "Not found, invalid id or store failure", body = Envelope<String>)
    )
)]
#[instrument(skip(service))]
async fn get_event_log<R: EventLogRepository>(
    State(service): State<Arc<EventLogService<R>>>,
    query: Result<Query<EventLogQuery>, QueryRejection>,
) -> Result<Envelope<EventLog>, EventLogError> {
    let event_log_id = query
        .map(|Query(query)| query.event_log_id)
        .unwrap_or_else(|rejection| unreadable_id(&rejection.body_text()));
    let event_log = service.get_one(&event_log_id).await?;
    Ok(Envelope::ok(event_log))
}

/// Fetch one event log by id, given as a path segment
#[utoipa::path(
    get,
    path = "/data/{eventLogId}",
    tag = "EventLogs",
    params(("eventLogId" = String, Path, description = "24-char hex id of the record")),
    responses(
        (status = 200, description = "Event log found", body = Envelope<EventLog>),
        (status = 500, description = "Not found, invalid id or store failure", body = Envelope<String>)
    )
)]
#[instrument(skip(service))]
async fn get_event_log_by_path<R: EventLogRepository>(
    State(service): State<Arc<EventLogService<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Envelope<EventLog>, EventLogError> {
    let event_log_id = path
        .map(|Path(event_log_id)| event_log_id)
        .unwrap_or_else(|rejection| unreadable_id(&rejection.body_text()));
    let event_log = service.get_one(&event_log_id).await?;
    Ok(Envelope::ok(event_log))
}

/// An id the extractor could not read is looked up as an empty id, which
/// never decodes and so ends in the not-found envelope.
fn unreadable_id(reason: &str) -> String {
    warn!(reason, "Unreadable event log id");
    String::new()
}

/// List every event log
#[utoipa::path(
    get,
    path = "/alldata",
    tag = "EventLogs",
    responses(
        (status = 200, description = "All event logs, possibly empty", body = Envelope<Vec<EventLog>>),
        (status = 500, description = "Query or decode failure", body = Envelope<String>)
    )
)]
#[instrument(skip(service))]
async fn list_event_logs<R: EventLogRepository>(
    State(service): State<Arc<EventLogService<R>>>,
) -> Result<Envelope<Vec<EventLog>>, EventLogError> {
    let event_logs = service.get_all().await?;
    Ok(Envelope::ok(event_logs))
}

/// Submit a new event log
#[utoipa::path(
    post,
    path = "/event/submit",
    tag = "EventLogs",
    request_body = CreateEventLog,
    responses(
        (status = 201, description = "Event log stored", body = Envelope<InsertAck>),
        (status = 400, description = "Malformed body or missing field", body = Envelope<String>),
        (status = 500, description = "Store failure", body = Envelope<String>)
    )
)]
#[instrument(skip(service, body))]
async fn submit_event_log<R: EventLogRepository>(
    State(service): State<Arc<EventLogService<R>>>,
    body: Bytes,
) -> Result<Envelope<InsertAck>, EventLogError> {
    let ack = service.create(&body).await?;
    Ok(Envelope::created(ack))
}
