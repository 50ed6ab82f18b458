//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Log API",
        description = "Records client events in MongoDB and serves them back",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "EventLogs", description = "Event log records (MongoDB)")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation served at `/api-docs/openapi.json`
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_event_logs::ApiDoc::openapi());
        doc
    }
}
