use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::dto::MeResponse;
use crate::context::IdentityContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn me(Extension(identity): Extension<IdentityContext>) -> impl IntoResponse {
    Json(MeResponse {
        id: identity.identity_id(),
        username: identity.username().to_string(),
    })
}
