//! Authentication orchestrator.
//!
//! Ties together request validation, the lockout tracker, the credential
//! store, password verification, token issuance, and the revocation set. The
//! HTTP layer stays thin; every security decision lives here.

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::crypto::{self, DUMMY_BCRYPT_HASH};
use crate::errors::AuthError;
use crate::models::{AuthRequest, IssuedToken};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::{
    record_login_attempt, record_token_revoked, record_token_validation,
};
use crate::services::attempt_tracker::AttemptTracker;
use crate::services::revocation::RevokedTokens;
use crate::services::token_service::TokenService;
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

pub struct SecurityService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenService,
    attempts: AttemptTracker,
    revoked: RevokedTokens,
}

impl SecurityService {
    pub fn new(config: &Config, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            tokens: TokenService::new(
                config.secret_key_bytes(),
                config.token_expiration_minutes,
            ),
            attempts: AttemptTracker::new(config.max_login_attempts, config.lockout_minutes),
            revoked: RevokedTokens::new(),
        }
    }

    /// Authenticate a login request and issue an access token.
    ///
    /// Ordering is deliberate: shape validation first (no tracker update for
    /// garbage input), then the lockout check, then credential verification.
    /// A locked username fails even with the correct password, and the
    /// response for a lockout is indistinguishable from a wrong password.
    #[instrument(skip_all)]
    pub fn login(&self, request: &AuthRequest) -> Result<IssuedToken, AuthError> {
        let started = Instant::now();
        let result = self.login_inner(request);

        match &result {
            Ok(_) => record_login_attempt("success", "none", started.elapsed()),
            Err(e) => record_login_attempt("error", e.metric_reason(), started.elapsed()),
        }

        result
    }

    fn login_inner(&self, request: &AuthRequest) -> Result<IssuedToken, AuthError> {
        request.validate()?;
        let username = request.username.trim();
        let user_hash = hash_for_correlation(username);

        if self.attempts.is_locked(username) {
            tracing::warn!(user = %user_hash, "Login rejected: username is locked out");
            return Err(AuthError::UserBlocked);
        }

        let credential = self.store.find_by_username(username);

        // Verify against the stored hash, or a dummy hash when the username
        // is unknown, so both paths cost one bcrypt verification.
        let password = request.password.expose_secret();
        let verified = match &credential {
            Some(c) => crypto::verify_password(password, &c.password_hash),
            None => crypto::verify_password(password, DUMMY_BCRYPT_HASH).map(|_| false),
        };

        let authenticated = match verified {
            Ok(matched) => matched && credential.as_ref().is_some_and(|c| c.is_active),
            Err(e) => {
                // A corrupt stored hash is an operator problem, but to the
                // client it is still a failed login.
                tracing::error!(user = %user_hash, error = %e, "Password verification errored");
                false
            }
        };

        if !authenticated {
            self.attempts.record_failure(username);
            tracing::info!(
                user = %user_hash,
                failures = self.attempts.failure_count(username),
                "Failed login attempt"
            );
            return Err(AuthError::BadCredentials);
        }

        self.attempts.record_success(username);
        let issued = self.tokens.issue(username)?;
        tracing::info!(user = %user_hash, "Login succeeded, token issued");
        Ok(issued)
    }

    /// Revoke the presented bearer token.
    ///
    /// The token must be well-formed, unexpired, and not already revoked;
    /// anything else gets the same 401-class errors a protected route would
    /// return.
    #[instrument(skip_all)]
    pub fn logout(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let token = bearer_token(authorization)?;
        if self.revoked.is_revoked(token) {
            return Err(AuthError::RevokedToken);
        }

        let subject = self.tokens.extract_subject(token)?;
        self.revoked.revoke(token);
        record_token_revoked();
        tracing::info!(user = %hash_for_correlation(&subject), "User logged out, token revoked");
        Ok(())
    }

    /// Validate the bearer token on a protected route and return its subject.
    ///
    /// Revocation is checked before signature validation so a blacklisted
    /// token is reported as such even after it expires.
    #[instrument(skip_all)]
    pub fn authorize_bearer(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let token = bearer_token(authorization)?;
        if self.revoked.is_revoked(token) {
            record_token_validation("error", AuthError::RevokedToken.metric_reason());
            return Err(AuthError::RevokedToken);
        }

        match self.tokens.extract_subject(token) {
            Ok(subject) => {
                record_token_validation("success", "none");
                Ok(subject)
            }
            Err(e) => {
                record_token_validation("error", e.metric_reason());
                Err(e)
            }
        }
    }

    /// Current consecutive-failure count for a username.
    pub fn failure_count(&self, username: &str) -> u32 {
        self.attempts.failure_count(username)
    }
}

// An absent header or a non-Bearer scheme means no credential was presented
// at all; that is the same uniform failure as a wrong password, not a token
// problem.
fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    authorization
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::BadCredentials)
}
