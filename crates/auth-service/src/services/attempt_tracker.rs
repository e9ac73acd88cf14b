//! Per-username failed-login tracking with wall-clock lockout.
//!
//! State is process-local and lost on restart: lockouts do not survive a
//! redeploy. That trade-off favors availability over strictness and is
//! documented in DESIGN.md.

use crate::observability::metrics::record_lockout_triggered;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct FailedAttempt {
    count: u32,
    locked_until: Option<DateTime<Utc>>,
}

/// Tracks consecutive failed logins per username and locks a username out
/// once the configured threshold is reached.
///
/// The sharded map gives per-key atomic updates: two threads failing the same
/// username cannot lose an increment, and unrelated usernames never contend
/// on a single lock.
pub struct AttemptTracker {
    attempts: DashMap<String, FailedAttempt>,
    max_attempts: u32,
    lockout: Duration,
}

impl AttemptTracker {
    pub fn new(max_attempts: u32, lockout_minutes: i64) -> Self {
        Self {
            attempts: DashMap::new(),
            max_attempts,
            lockout: Duration::minutes(lockout_minutes),
        }
    }

    /// Record one failed login. Creates the record on first failure; when the
    /// post-increment count reaches the threshold, sets the lock deadline.
    /// Every further failure at or past the threshold extends the deadline.
    pub fn record_failure(&self, username: &str) {
        self.record_failure_at(username, Utc::now());
    }

    /// Report whether the username is currently locked out.
    ///
    /// Lazy expiry: an elapsed deadline simply reads as unlocked; the stale
    /// record stays until the next failure overwrites it or a success clears
    /// it.
    pub fn is_locked(&self, username: &str) -> bool {
        self.is_locked_at(username, Utc::now())
    }

    /// Full reset on successful authentication: the record is removed, so the
    /// next failure starts counting from zero again.
    pub fn record_success(&self, username: &str) {
        self.attempts.remove(username);
    }

    /// Current consecutive-failure count (0 when no record exists).
    pub fn failure_count(&self, username: &str) -> u32 {
        self.attempts.get(username).map_or(0, |a| a.count)
    }

    // Deterministic variants against an explicit `now`, so boundary behavior
    // can be tested without wall-clock dependence.

    pub(crate) fn record_failure_at(&self, username: &str, now: DateTime<Utc>) {
        let mut entry = self
            .attempts
            .entry(username.to_string())
            .or_insert(FailedAttempt {
                count: 0,
                locked_until: None,
            });

        entry.count += 1;
        if entry.count >= self.max_attempts {
            entry.locked_until = Some(now + self.lockout);
            record_lockout_triggered();
            tracing::warn!(
                failures = entry.count,
                lockout_minutes = self.lockout.num_minutes(),
                "Username locked out after repeated failed logins"
            );
        }
    }

    pub(crate) fn is_locked_at(&self, username: &str, now: DateTime<Utc>) -> bool {
        self.attempts
            .get(username)
            .and_then(|a| a.locked_until)
            .is_some_and(|deadline| now < deadline)
    }
}
