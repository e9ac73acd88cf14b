//! Revoked-token set backing logout.
//!
//! Membership is checked on every authenticated request, so the set uses a
//! sharded concurrent set rather than a single locked collection. Entries are
//! never evicted; revoked tokens age out of relevance when they expire, and
//! the set is bounded in practice by the token lifetime times the logout
//! rate. State is process-local and cleared on restart.

use dashmap::DashSet;

#[derive(Default)]
pub struct RevokedTokens {
    tokens: DashSet<String>,
}

impl RevokedTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token to the revocation set. Idempotent: revoking an
    /// already-revoked token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.tokens.insert(token.to_string());
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
