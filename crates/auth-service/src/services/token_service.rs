//! JWT issuance and validation (HS256).
//!
//! Keys are derived from the configured secret once at construction; the
//! per-request paths only sign or verify.

use crate::errors::AuthError;
use crate::models::IssuedToken;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Upper bound on token length accepted for parsing. A legitimate token here
/// is a few hundred bytes; anything larger is garbage and gets rejected
/// before any base64 or signature work.
pub const MAX_TOKEN_BYTES: usize = 8 * 1024;

/// Registered claims carried by an access token.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Subjects are usernames; keep them out of Debug output.
impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &[u8], token_expiration_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is a hard boundary: a token is valid strictly before `exp`,
        // no leeway.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration: Duration::minutes(token_expiration_minutes),
            validation,
        }
    }

    /// Sign a new token for the given username, valid from now until now plus
    /// the configured expiration window.
    #[instrument(skip_all)]
    pub fn issue(&self, username: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(username, Utc::now())
    }

    /// Extract and return the subject of a valid token.
    ///
    /// Distinguishes an expired-but-otherwise-valid token from a malformed or
    /// tampered one; callers decide whether that distinction reaches the
    /// client.
    #[instrument(skip_all)]
    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        Ok(self.decode_claims(token)?.sub)
    }

    /// Check that a token is valid and was issued to the expected subject.
    #[instrument(skip_all)]
    pub fn validate(&self, token: &str, expected_subject: &str) -> Result<(), AuthError> {
        let subject = self.extract_subject(token)?;
        if subject != expected_subject {
            return Err(AuthError::InvalidToken("Subject mismatch".to_string()));
        }
        Ok(())
    }

    // Deterministic issuance against an explicit `now`, so expiry behavior is
    // testable without sleeping.
    pub(crate) fn issue_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let iat = now.timestamp();
        let exp = (now + self.expiration).timestamp();

        let claims = Claims {
            sub: username.to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Crypto(format!("Token signing failed: {}", e)))?;

        // Wire timestamps mirror the claims exactly (second precision).
        let issued_at = DateTime::from_timestamp(iat, 0).ok_or(AuthError::Internal)?;
        let expired_at = DateTime::from_timestamp(exp, 0).ok_or(AuthError::Internal)?;

        Ok(IssuedToken {
            owner_user_name: username.to_string(),
            issued_at,
            expired_at,
            token,
        })
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        if token.len() > MAX_TOKEN_BYTES {
            return Err(AuthError::InvalidToken(format!(
                "Token exceeds {} bytes",
                MAX_TOKEN_BYTES
            )));
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}
