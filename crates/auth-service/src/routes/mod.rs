use crate::handlers::auth_handler::{self, AppState};
use crate::middleware::auth::require_auth;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_routes(state: Arc<AppState>) -> Router {
    // Routes behind bearer-token authentication.
    let protected = Router::new()
        .route("/api/v1/me", get(auth_handler::me))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_auth,
        ));

    Router::new()
        // Authentication endpoints (public; login is the way in, logout
        // validates its own bearer token)
        .route("/api/v1/auth/login", post(auth_handler::login))
        .route("/api/v1/auth/logout", post(auth_handler::logout))
        .merge(protected)
        // Health check
        .route("/health", get(health_check))
        // Request tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
