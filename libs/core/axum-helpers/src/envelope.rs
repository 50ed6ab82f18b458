//! Uniform response envelope.
//!
//! Every outcome, success or failure, is answered with the same JSON shape:
//!
//! ```json
//! { "status": 200, "message": "success", "data": { "data": <payload> } }
//! { "status": 500, "message": "error",   "data": { "data": "diagnostic" } }
//! ```
//!
//! The HTTP status line always matches `status`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MESSAGE_SUCCESS: &str = "success";
pub const MESSAGE_ERROR: &str = "error";

/// Inner payload slot, kept as `{ "data": ... }` for client compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnvelopeData<T> {
    pub data: T,
}

/// Response wrapper carrying a status code, a short message and a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// Numeric HTTP status, mirrored from the response status line
    pub status: u16,
    /// `"success"` or `"error"`
    pub message: String,
    pub data: EnvelopeData<T>,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: EnvelopeData { data },
        }
    }

    /// `200 OK` success envelope
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, MESSAGE_SUCCESS, data)
    }

    /// `201 Created` success envelope
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, MESSAGE_SUCCESS, data)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_success(&self) -> bool {
        self.message == MESSAGE_SUCCESS
    }

    pub fn into_data(self) -> T {
        self.data.data
    }
}

impl Envelope<String> {
    /// Error envelope with a diagnostic string as payload
    pub fn error(status: StatusCode, diagnostic: impl Into<String>) -> Self {
        Self::new(status, MESSAGE_ERROR, diagnostic.into())
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
