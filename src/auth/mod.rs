//! Guest session auth: JWT codec, error taxonomy, and the session facade.

pub mod error;
pub mod jwt;
pub mod service;

pub use error::AuthError;
pub use jwt::{Claims, JwtHandler, TokenType};
pub use service::{AuthService, TokenPair};
