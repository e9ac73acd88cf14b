use crate::errors::AuthError;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_USERNAME_LEN: usize = 2;
pub const MAX_USERNAME_LEN: usize = 255;
pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_PASSWORD_LEN: usize = 10;

/// Login request body.
///
/// The password is wrapped in `SecretString` so derived `Debug` output and
/// tracing never expose it.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: SecretString,
}

impl AuthRequest {
    /// Validate the request shape before any credential work happens.
    ///
    /// Rules carried over from the gym CRM: username 2-255 chars, password
    /// 4-10 chars with at least one uppercase letter, one lowercase letter,
    /// and one digit.
    pub fn validate(&self) -> Result<(), AuthError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("User name is mandatory".to_string()));
        }
        if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.chars().count()) {
            return Err(AuthError::Validation(format!(
                "User name must be between {} and {} characters",
                MIN_USERNAME_LEN, MAX_USERNAME_LEN
            )));
        }

        let password = self.password.expose_secret();
        if password.trim().is_empty() {
            return Err(AuthError::Validation("Password is mandatory".to_string()));
        }
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.chars().count()) {
            return Err(AuthError::Validation(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
            )));
        }
        if !has_password_complexity(password) {
            return Err(AuthError::Validation(
                "Password must contain at least one uppercase letter, one lowercase letter, and one number"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn has_password_complexity(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    has_upper && has_lower && has_digit
}

/// Issued token value object, returned by `POST /api/v1/auth/login`.
///
/// Field names on the wire keep the original camelCase contract:
/// `{ownerUserName, issuedAt, expiredAt, token}`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub owner_user_name: String,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
    pub token: String,
}

/// The signed value is a bearer credential; redact it in Debug output.
impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("owner_user_name", &self.owner_user_name)
            .field("issued_at", &self.issued_at)
            .field("expired_at", &self.expired_at)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
