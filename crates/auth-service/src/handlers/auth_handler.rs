use crate::errors::AuthError;
use crate::models::{AuthRequest, IssuedToken};
use crate::services::security_service::SecurityService;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub security: Arc<SecurityService>,
}

/// Identity attached to the request by the authentication middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: String,
}

/// Handle login.
///
/// POST /api/v1/auth/login
///
/// Returns `201 Created` with the issued token on success. Lockouts and bad
/// credentials both surface as the same 401 response.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthRequest>,
) -> Result<(StatusCode, Json<IssuedToken>), AuthError> {
    let issued = state.security.login(&payload)?;
    Ok((StatusCode::CREATED, Json(issued)))
}

/// Handle logout.
///
/// POST /api/v1/auth/logout
///
/// Revokes the presented bearer token; it is rejected on all routes from
/// this point on, even though its signature stays valid until expiry.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<&'static str, AuthError> {
    let authorization = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    state.security.logout(authorization)?;
    Ok("Logged out successfully")
}

/// Return the identity bound to the presented token.
///
/// GET /api/v1/me (protected)
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<MeResponse> {
    Json(MeResponse {
        username: user.username,
    })
}
