//! Guest session endpoints: login, me, refresh, logout.
//!
//! Tokens travel in a pair of HttpOnly cookies. Handlers stay thin; the
//! session rules live in [`crate::auth::AuthService`].

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthError;
use crate::http::envelope::{ApiError, Envelope};
use crate::http::AppState;
use crate::store::User;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Deserialize)]
pub struct GuestLoginRequest {
    pub username: String,
}

/// Session payload returned by login, me, and refresh.
///
/// `in_case` / `current_case_id` are placeholders until case membership is
/// tracked; they are false/null for now and `current_case_id` must be null
/// whenever `in_case` is false.
#[derive(Debug, Serialize)]
pub struct GuestInfo {
    pub id: Uuid,
    pub username: String,
    pub in_case: bool,
    pub current_case_id: Option<Uuid>,
}

impl GuestInfo {
    fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            in_case: false,
            current_case_id: None,
        }
    }
}

fn valid_username(name: &str) -> bool {
    (3..=32).contains(&name.chars().count())
}

fn session_cookie(
    name: &'static str,
    value: String,
    max_age: std::time::Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age.as_secs() as i64))
        .build()
}

pub async fn guest_login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<GuestLoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    if !valid_username(&body.username) {
        return Err(ApiError::validation());
    }
    let (user, pair) = state.auth.guest_login(&body.username)?;
    let jwt = state.auth.jwt();
    let jar = jar
        .add(session_cookie(ACCESS_COOKIE, pair.access_token, jwt.access_ttl()))
        .add(session_cookie(REFRESH_COOKIE, pair.refresh_token, jwt.refresh_ttl()));
    Ok((jar, Envelope::ok(GuestInfo::for_user(&user))))
}

pub async fn me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Envelope<GuestInfo>, ApiError> {
    let token = jar.get(ACCESS_COOKIE).ok_or(AuthError::TokenMissing)?;
    let user = state.auth.current_user(token.value())?;
    Ok(Envelope::ok(GuestInfo::for_user(&user)))
}

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(AuthError::TokenMissing)?;
    let (user, access_token) = state.auth.refresh_access(&refresh_token)?;
    let jar = jar.add(session_cookie(
        ACCESS_COOKIE,
        access_token,
        state.auth.jwt().access_ttl(),
    ));
    Ok((jar, Envelope::ok(GuestInfo::for_user(&user))))
}

/// Clears both session cookies. Requires no valid token and always succeeds.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar
        .remove(Cookie::build((ACCESS_COOKIE, "")).path("/"))
        .remove(Cookie::build((REFRESH_COOKIE, "")).path("/"));
    (jar, Envelope::ok_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_length_bounds() {
        assert!(!valid_username("ab"));
        assert!(valid_username("abc"));
        assert!(valid_username(&"x".repeat(32)));
        assert!(!valid_username(&"x".repeat(33)));
        // length counts characters, not bytes
        assert!(valid_username("말랑카우"));
    }
}
