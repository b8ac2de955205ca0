//! Consistent JSON error responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use brewops_auth::AuthError;
use brewops_core::{DomainError, StoreError};

pub const INVALID_CREDENTIALS: &str = "could not validate credentials";

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 401 with the `WWW-Authenticate: Bearer` challenge.
pub fn unauthorized(message: &'static str) -> Response {
    let mut resp = json_error(StatusCode::UNAUTHORIZED, "unauthorized", message);
    resp.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    resp
}

/// 500 with a generic body; the detail only goes to the log.
pub fn internal_error(detail: impl core::fmt::Display) -> Response {
    tracing::error!(error = %detail, "request failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error",
    )
}

pub fn auth_error_to_response(err: AuthError) -> Response {
    match err {
        AuthError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        AuthError::Conflict => json_error(
            StatusCode::BAD_REQUEST,
            "conflict",
            "username already registered",
        ),
        AuthError::Unauthenticated => unauthorized(INVALID_CREDENTIALS),
        AuthError::Internal(detail) => internal_error(detail),
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

/// `what` names the missing record in 404 bodies (e.g. "batch").
pub fn store_error_to_response(err: StoreError, what: &'static str) -> Response {
    match err {
        StoreError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
        }
        StoreError::Duplicate(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Backend(detail) => internal_error(detail),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extractor rejections
// ─────────────────────────────────────────────────────────────────────────────

/// Undecodable request bodies are 400 with the usual JSON error shape.
pub fn json_rejection(rejection: JsonRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn query_rejection(rejection: QueryRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn path_rejection(rejection: PathRejection) -> Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}
