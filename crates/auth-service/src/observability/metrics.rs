//! Metrics definitions for the authentication service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `auth_` prefix for the authentication service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: success, error
//! - `reason`: bounded by the error taxonomy (bad_credentials, user_blocked,
//!   invalid_token, expired_token, revoked_token, validation, crypto,
//!   internal)
//!
//! Usernames and tokens never appear as label values.

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a login attempt outcome and its duration.
///
/// Metrics: `auth_login_duration_seconds`, `auth_login_attempts_total`
/// Labels: `status`, `reason`
pub fn record_login_attempt(status: &str, reason: &str, duration: Duration) {
    histogram!("auth_login_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("auth_login_attempts_total", "status" => status.to_string(), "reason" => reason.to_string())
        .increment(1);
}

/// Record a username crossing the failed-attempt threshold.
///
/// Metric: `auth_lockouts_triggered_total`
pub fn record_lockout_triggered() {
    counter!("auth_lockouts_triggered_total").increment(1);
}

/// Record a bearer-token validation result on a protected route.
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `reason`
pub fn record_token_validation(status: &str, reason: &str) {
    counter!("auth_token_validations_total", "status" => status.to_string(), "reason" => reason.to_string())
        .increment(1);
}

/// Record a token revocation via logout.
///
/// Metric: `auth_tokens_revoked_total`
pub fn record_token_revoked() {
    counter!("auth_tokens_revoked_total").increment(1);
}
