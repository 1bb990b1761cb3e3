//! Response envelope shared by every JSON endpoint.
//!
//! The body shape is `{ok, code, message, data, meta}` with all five keys
//! serialized on every response. `meta` is reserved and currently null.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub code: &'static str,
    pub message: Option<&'static str>,
    pub data: Option<T>,
    pub meta: Option<Value>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, code: "OK", message: None, data: Some(data), meta: None }
    }
}

impl Envelope<()> {
    /// Success with no payload, e.g. logout.
    pub fn ok_empty() -> Self {
        Self { ok: true, code: "OK", message: None, data: None, meta: None }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Error half of the envelope contract. Handlers return this and the
/// conversion to `(status, body)` happens once, here.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str) -> Self {
        Self { status, code, message: None }
    }

    pub fn with_message(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self { status, code, message: Some(message) }
    }

    pub fn validation() -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<()> {
            ok: false,
            code: self.code,
            message: self.message,
            data: None,
            meta: None,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.status().is_server_error() {
            tracing::error!(error = %err, "auth operation failed");
        }
        ApiError::new(err.status(), err.code())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "request body rejected");
        ApiError::validation()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "path params rejected");
        ApiError::validation()
    }
}
