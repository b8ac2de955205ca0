use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use brewops_auth::AuthError;

use crate::app::dto::{CredentialsRequest, TokenResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn register(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    match services
        .auth
        .register(&body.username, body.password, Utc::now())
        .await
    {
        Ok(token) => Json(TokenResponse::from(token)).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<AppServices>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::json_rejection(rejection),
    };

    match services
        .auth
        .login(&body.username, body.password, Utc::now())
        .await
    {
        Ok(token) => Json(TokenResponse::from(token)).into_response(),
        Err(AuthError::Unauthenticated) => {
            errors::unauthorized("incorrect username or password")
        }
        Err(e) => errors::auth_error_to_response(e),
    }
}
