//! Process-local persistence. Nothing here survives a restart.

pub mod refresh_tokens;
pub mod users;

pub use refresh_tokens::{hash_jti, RefreshTokenStore};
pub use users::{User, UserStore, UserStoreError};
