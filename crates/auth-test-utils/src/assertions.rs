//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for issued access tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: Option<String>,
}

/// JWT claims structure
#[derive(Debug, Deserialize)]
struct JwtClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("john.smith")
///     .assert_expires_in_minutes(60);
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a structurally valid HS256 JWT.
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject.
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the claimed lifetime (`exp - iat`) is exactly the given
    /// number of minutes.
    fn assert_expires_in_minutes(&self, minutes: i64) -> &Self;
}

fn decode_claims(token: &str) -> JwtClaims {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(
        parts.len(),
        3,
        "JWT must have 3 parts (header.payload.signature), got {}",
        parts.len()
    );

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .expect("Failed to base64 decode JWT payload");
    serde_json::from_slice(&payload).expect("Failed to parse JWT claims JSON")
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("Failed to base64 decode JWT header");
        let header: JwtHeader =
            serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON");

        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        if let Some(typ) = &header.typ {
            assert_eq!(typ, "JWT", "Expected JWT type");
        }

        // Claims must parse too.
        let claims = decode_claims(self);
        assert!(claims.exp > claims.iat, "exp must be after iat");

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.sub, subject,
            "Token subject mismatch: expected {}, got {}",
            subject, claims.sub
        );
        self
    }

    fn assert_expires_in_minutes(&self, minutes: i64) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            minutes * 60,
            "Token lifetime mismatch"
        );
        self
    }
}
