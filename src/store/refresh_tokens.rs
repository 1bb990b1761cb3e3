//! Server-side registry of issued refresh tokens.
//!
//! Tracks which refresh `jti`s are still live so a future logout-everywhere
//! or rotation step can revoke them. Only the SHA-256 of a `jti` is kept.

use std::sync::Arc;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lowercase hex SHA-256 of a token id. Raw `jti` values are never stored.
pub fn hash_jti(jti: &str) -> String {
    hex::encode(Sha256::digest(jti.as_bytes()))
}

#[derive(Clone, Default)]
pub struct RefreshTokenStore {
    entries: Arc<DashMap<(Uuid, String), OffsetDateTime>>,
}

impl RefreshTokenStore {
    pub fn new() -> Self { Self::default() }

    pub fn store(&self, user_id: Uuid, jti: &str, expires_at: OffsetDateTime) {
        self.entries.insert((user_id, hash_jti(jti)), expires_at);
    }

    /// Removes the entry. Returns whether it was present.
    pub fn revoke(&self, user_id: Uuid, jti: &str) -> bool {
        self.entries.remove(&(user_id, hash_jti(jti))).is_some()
    }

    /// Live means stored and not past its expiry moment.
    pub fn is_valid(&self, user_id: Uuid, jti: &str) -> bool {
        match self.entries.get(&(user_id, hash_jti(jti))) {
            Some(expires_at) => *expires_at > OffsetDateTime::now_utc(),
            None => false,
        }
    }
}
