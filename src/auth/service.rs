//! Session facade tying the token codec to the identity and token stores.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::auth::jwt::{JwtHandler, TokenType};
use crate::auth::AuthError;
use crate::store::{RefreshTokenStore, User, UserStore, UserStoreError};

/// Freshly issued cookie pair for one session.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthService {
    jwt: Arc<JwtHandler>,
    users: UserStore,
    refresh_tokens: RefreshTokenStore,
}

impl AuthService {
    pub fn new(jwt: JwtHandler, users: UserStore, refresh_tokens: RefreshTokenStore) -> Self {
        Self { jwt: Arc::new(jwt), users, refresh_tokens }
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Find-or-create by name. A lost insert race re-reads the winner;
    /// users are never deleted, so the loop terminates.
    pub fn get_or_create_user(&self, username: &str) -> User {
        loop {
            if let Some(user) = self.users.get_by_username(username) {
                return user;
            }
            match self.users.insert(username) {
                Ok(user) => return user,
                Err(UserStoreError::UsernameTaken) => continue,
            }
        }
    }

    /// Upserts the guest and issues a cookie pair. The refresh `jti` is
    /// recorded before the pair is handed back, so any pair a caller has
    /// seen is also known to the token store.
    pub fn guest_login(&self, username: &str) -> Result<(User, TokenPair), AuthError> {
        let user = self.get_or_create_user(username);
        let sub = user.id.to_string();
        let access_token = self.jwt.issue_access_token(&sub, None)?;
        let (refresh_token, jti) = self.jwt.issue_refresh_token(&sub, None, None)?;
        let expires_at = OffsetDateTime::now_utc() + self.jwt.refresh_ttl();
        self.refresh_tokens.store(user.id, &jti, expires_at);
        Ok((user, TokenPair { access_token, refresh_token }))
    }

    /// Resolves the current user from an access token.
    pub fn current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let user_id = self.jwt.extract_user_id(access_token, TokenType::Access)?;
        self.users.get(user_id).ok_or(AuthError::UserNotFound)
    }

    /// Re-issues an access token off a valid refresh token. The refresh
    /// token itself is left as-is and stays usable until it expires.
    pub fn refresh_access(&self, refresh_token: &str) -> Result<(User, String), AuthError> {
        let user_id = self.jwt.extract_user_id(refresh_token, TokenType::Refresh)?;
        let user = self.users.get(user_id).ok_or(AuthError::UserNotFound)?;
        let access_token = self.jwt.issue_access_token(&user.id.to_string(), None)?;
        Ok((user, access_token))
    }
}
