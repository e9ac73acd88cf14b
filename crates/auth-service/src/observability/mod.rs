//! Logging and metrics helpers.

pub mod metrics;

use sha2::{Digest, Sha256};

/// Stable correlation hash for a username.
///
/// Usernames are personal data and never appear in logs or metric labels;
/// this truncated SHA-256 lets operators correlate events for one account
/// across log lines without learning who the account belongs to.
pub fn hash_for_correlation(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(16);
    hash
}
