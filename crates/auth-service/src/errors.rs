use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy for the authentication core.
///
/// `UserBlocked` and `BadCredentials` are distinct internally (so lockouts can
/// be logged and metered separately) but render identical responses to avoid
/// leaking whether a username exists.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User is temporarily blocked")]
    UserBlocked,

    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token is blacklisted")]
    RevokedToken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Internal server error")]
    Internal,
}

impl AuthError {
    /// Bounded label value for metrics. Never contains user input.
    pub fn metric_reason(&self) -> &'static str {
        match self {
            AuthError::UserBlocked => "user_blocked",
            AuthError::BadCredentials => "bad_credentials",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
            AuthError::RevokedToken => "revoked_token",
            AuthError::Validation(_) => "validation",
            AuthError::Crypto(_) => "crypto",
            AuthError::Internal => "internal",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Same wire response as BadCredentials: lockout must not be
            // distinguishable from a wrong password by the client.
            AuthError::UserBlocked | AuthError::BadCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            AuthError::InvalidToken(_) | AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "The access token is invalid or expired".to_string(),
            ),
            AuthError::RevokedToken => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_REVOKED",
                "Token is blacklisted".to_string(),
            ),
            AuthError::Validation(reason) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", reason.clone())
            }
            AuthError::Crypto(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CRYPTO_ERROR",
                "An internal cryptographic error occurred".to_string(),
            ),
            AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
