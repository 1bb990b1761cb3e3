//! In-memory guest identity store.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// A guest account. Rows are never deleted once created.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: OffsetDateTime,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("username already taken")]
    UsernameTaken,
}

/// Map pair keyed by id and by username. The id row is written before the
/// username row becomes visible, so a username hit always resolves to a user.
#[derive(Clone, Default)]
pub struct UserStore {
    by_id: Arc<DashMap<Uuid, User>>,
    by_username: Arc<DashMap<String, Uuid>>,
}

impl UserStore {
    pub fn new() -> Self { Self::default() }

    /// Claims `username` atomically. Losers of a concurrent claim get
    /// `UsernameTaken` and can re-read the winner.
    pub fn insert(&self, username: &str) -> Result<User, UserStoreError> {
        match self.by_username.entry(username.to_owned()) {
            Entry::Occupied(_) => Err(UserStoreError::UsernameTaken),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    username: username.to_owned(),
                    created_at: OffsetDateTime::now_utc(),
                };
                self.by_id.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.by_id.get(&id).map(|u| u.clone())
    }

    pub fn get_by_username(&self, username: &str) -> Option<User> {
        let id = *self.by_username.get(username)?;
        self.get(id)
    }
}
