use crate::errors::AuthError;
use crate::handlers::auth_handler::{AppState, AuthenticatedUser};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Authentication middleware for protected routes.
///
/// Extracts the bearer token from the Authorization header, rejects revoked
/// tokens before signature checks, validates the token, and stores the
/// authenticated identity in request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    let username = state.security.authorize_bearer(authorization)?;

    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}
