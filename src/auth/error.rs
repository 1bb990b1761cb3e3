//! Error taxonomy for token issuance, verification, and session lookup.
//!
//! Every variant maps to exactly one HTTP status and stable error code, so
//! handlers can convert without per-endpoint match arms.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("auth token not included")]
    TokenMissing,
    #[error("auth token invalid")]
    TokenInvalid,
    #[error("auth token expired")]
    TokenExpired,
    #[error("auth token payload invalid")]
    TokenPayloadInvalid,
    #[error("auth user not found")]
    UserNotFound,
    /// Caller-supplied extra claims collide with a reserved claim name.
    #[error("extra claims collide with reserved claims")]
    InvalidExtraClaims,
    /// Signing failed. Usually bad key material for the configured algorithm.
    #[error("token encoding failed")]
    EncodingFailed,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::TokenPayloadInvalid => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidExtraClaims | AuthError::EncodingFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::TokenMissing => "AUTH_TOKEN_NOT_INCLUDED",
            AuthError::TokenInvalid => "AUTH_TOKEN_INVALID",
            AuthError::TokenExpired => "AUTH_TOKEN_EXPIRED",
            AuthError::TokenPayloadInvalid => "AUTH_TOKEN_PAYLOAD_INVALID",
            AuthError::UserNotFound => "AUTH_USER_NOT_FOUND",
            AuthError::InvalidExtraClaims | AuthError::EncodingFailed => "INTERNAL_ERROR",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        }
    }
}
