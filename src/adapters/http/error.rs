//! API error type shared by every route.
//!
//! All failures render as `{"detail": ...}`. Upstream errors keep the
//! upstream body as the detail value.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::ports::UpstreamError;

/// API error type that converts local and upstream errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Request failed local validation.
    BadRequest(String),
    /// The upstream call failed.
    Upstream(UpstreamError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Status and detail body this error renders as.
    ///
    /// Upstream 4xx → 400, upstream 5xx → 502, anything else upstream → 500.
    pub fn status_and_detail(&self) -> (StatusCode, Value) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Value::String(msg.clone())),
            ApiError::Upstream(UpstreamError::Client { detail, .. }) => {
                (StatusCode::BAD_REQUEST, detail.clone())
            }
            ApiError::Upstream(UpstreamError::Server { detail, .. }) => {
                (StatusCode::BAD_GATEWAY, detail.clone())
            }
            ApiError::Upstream(UpstreamError::Generic(msg)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg.clone()))
            }
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %detail, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), detail = %detail, "request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
