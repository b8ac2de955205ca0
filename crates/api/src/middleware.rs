//! Session gate for protected routes.

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use brewops_auth::{AuthError, AuthService};

use crate::app::errors;
use crate::context::IdentityContext;

#[derive(Clone)]
pub struct AuthState {
    pub auth: AuthService,
}

/// Resolve the bearer token to an identity or stop the request with 401.
///
/// Handlers behind this layer can rely on an `IdentityContext` extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return errors::unauthorized(errors::INVALID_CREDENTIALS);
    };

    let identity = match state.auth.authenticate(token, Utc::now()).await {
        Ok(identity) => identity,
        Err(AuthError::Internal(detail)) => return errors::internal_error(detail),
        Err(_) => return errors::unauthorized(errors::INVALID_CREDENTIALS),
    };

    req.extensions_mut().insert(IdentityContext::from(identity));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;

    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}
