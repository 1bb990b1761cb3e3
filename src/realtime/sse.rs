//! State streams over SSE.
//!
//! A connection currently receives exactly one `SNAPSHOT_ON_CONNECT` frame
//! and the stream ends; incremental events follow once room and case state
//! go live. Frames carry the standard response envelope as their data
//! payload so REST and stream clients share one decoder.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use futures::stream;
use serde::Serialize;
use std::convert::Infallible;

use crate::auth::AuthError;
use crate::http::envelope::{ApiError, Envelope};
use crate::http::session::ACCESS_COOKIE;
use crate::http::AppState;
use crate::realtime::snapshot::{CaseSnapshot, RoomSnapshot};

// Membership is mocked by header presence until room and case state reach
// the session layer. The header values are not interpreted.
pub const ROOM_ID_HEADER: &str = "x-room-id";
pub const CASE_ID_HEADER: &str = "x-case-id";

/// Streams the room snapshot for the caller's current room.
pub async fn room_state(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    identify(&state, &jar)?;
    if !headers.contains_key(ROOM_ID_HEADER) {
        return Err(ApiError::with_message(
            StatusCode::FORBIDDEN,
            "PERMISSION_DENIED_NOT_IN_ROOM",
            "The user is not in a room.",
        ));
    }
    snapshot_stream("room_state", &RoomSnapshot::default())
}

/// Streams the case snapshot for the caller's current case.
pub async fn case_state(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    identify(&state, &jar)?;
    if !headers.contains_key(CASE_ID_HEADER) {
        return Err(ApiError::with_message(
            StatusCode::FORBIDDEN,
            "PERMISSION_DENIED_NOT_IN_CASE",
            "The user is not in a case.",
        ));
    }
    snapshot_stream("case_state", &CaseSnapshot::default())
}

fn identify(state: &AppState, jar: &CookieJar) -> Result<(), ApiError> {
    let token = jar.get(ACCESS_COOKIE).ok_or(AuthError::TokenMissing)?;
    state.auth.current_user(token.value())?;
    Ok(())
}

fn snapshot_stream<T: Serialize>(event: &str, snapshot: &T) -> Result<Response, ApiError> {
    let payload = Envelope {
        ok: true,
        code: "SNAPSHOT_ON_CONNECT",
        message: None,
        data: Some(snapshot),
        meta: None,
    };
    let frame = Event::default()
        .event(event)
        .id("1")
        .json_data(payload)
        .map_err(|err| {
            tracing::error!(error = %err, "snapshot frame serialization failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        })?;
    let stream = stream::once(async move { Ok::<_, Infallible>(frame) });
    Ok(Sse::new(stream).into_response())
}
