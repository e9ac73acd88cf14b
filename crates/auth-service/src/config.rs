use base64::{engine::general_purpose, Engine as _};
use secrecy::{ExposeSecret, SecretBox};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Minimum bcrypt cost factor (below this is insecure per OWASP guidance).
pub const MIN_BCRYPT_COST: u32 = 10;
/// Maximum bcrypt cost factor (above this causes excessive login latency).
pub const MAX_BCRYPT_COST: u32 = 14;
/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// HS256 requires at least 256 bits of key material.
pub const MIN_SECRET_KEY_BYTES: usize = 32;

pub const DEFAULT_TOKEN_EXPIRATION_MINUTES: i64 = 60;
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;
pub const DEFAULT_LOCKOUT_MINUTES: i64 = 5;

/// Service configuration, loaded from the environment once at startup.
///
/// The token signing secret is base64-decoded exactly once here; the decoded
/// bytes are wrapped in a `SecretBox` so `Debug` output stays redacted.
#[derive(Debug)]
pub struct Config {
    pub bind_address: String,
    pub secret_key: SecretBox<Vec<u8>>,
    pub token_expiration_minutes: i64,
    pub max_login_attempts: u32,
    pub lockout_minutes: i64,
    pub users_file: Option<String>,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8082".to_string());

        let secret_key_base64 = vars
            .get("GYM_AUTH_SECRET_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("GYM_AUTH_SECRET_KEY".to_string()))?;

        let secret_key = general_purpose::STANDARD
            .decode(secret_key_base64)
            .map_err(ConfigError::Base64Error)?;

        if secret_key.len() < MIN_SECRET_KEY_BYTES {
            return Err(ConfigError::InvalidSecretKey(format!(
                "Expected at least {} bytes, got {}",
                MIN_SECRET_KEY_BYTES,
                secret_key.len()
            )));
        }

        let token_expiration_minutes = parse_or_default(
            vars,
            "GYM_AUTH_TOKEN_EXPIRATION_MINUTES",
            DEFAULT_TOKEN_EXPIRATION_MINUTES,
        )?;
        if token_expiration_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "GYM_AUTH_TOKEN_EXPIRATION_MINUTES".to_string(),
                "must be positive".to_string(),
            ));
        }

        let max_login_attempts: u32 =
            parse_or_default(vars, "GYM_AUTH_MAX_LOGIN_ATTEMPTS", DEFAULT_MAX_LOGIN_ATTEMPTS)?;
        if max_login_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "GYM_AUTH_MAX_LOGIN_ATTEMPTS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let lockout_minutes: i64 =
            parse_or_default(vars, "GYM_AUTH_LOCKOUT_MINUTES", DEFAULT_LOCKOUT_MINUTES)?;
        if lockout_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "GYM_AUTH_LOCKOUT_MINUTES".to_string(),
                "must be positive".to_string(),
            ));
        }

        let bcrypt_cost: u32 = parse_or_default(vars, "GYM_AUTH_BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "GYM_AUTH_BCRYPT_COST".to_string(),
                format!("must be {}-{}", MIN_BCRYPT_COST, MAX_BCRYPT_COST),
            ));
        }

        let users_file = vars.get("GYM_AUTH_USERS_FILE").cloned();

        Ok(Config {
            bind_address,
            secret_key: SecretBox::new(Box::new(secret_key)),
            token_expiration_minutes,
            max_login_attempts,
            lockout_minutes,
            users_file,
            bcrypt_cost,
        })
    }

    /// Decoded signing key bytes.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.expose_secret()
    }
}

fn parse_or_default<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(name) {
        Some(raw) => raw.parse().map_err(|_| {
            ConfigError::InvalidValue(name.to_string(), format!("cannot parse {raw:?}"))
        }),
        None => Ok(default),
    }
}
