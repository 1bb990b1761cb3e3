//! HTTP surface: the response envelope, endpoint modules, and the router.

pub mod cases;
pub mod envelope;
pub mod health;
pub mod rooms;
pub mod session;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthService;
use crate::realtime::sse;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

/// Builds the full application router. Kept out of `main` so integration
/// tests drive the same route table and middleware as the binary.
pub fn app(state: AppState, cors_allow_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(sse::ROOM_ID_HEADER),
            HeaderName::from_static(sse::CASE_ID_HEADER),
        ])
        .allow_origin(cors_allow_origin)
        .allow_credentials(true);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/v1/auth/guest-login", post(session::guest_login))
        .route("/api/v1/auth/me", get(session::me))
        .route("/api/v1/auth/refresh", post(session::refresh))
        .route("/api/v1/auth/logout", post(session::logout))
        .route("/api/v1/rooms/:room_id/join", post(rooms::join_room))
        .route("/api/v1/rooms/current/leave", post(rooms::leave_room))
        .route("/api/v1/rooms/current/users/:user_id/kick", post(rooms::kick_user))
        .route("/api/v1/rooms/current/case-start", post(rooms::case_start))
        .route("/api/v1/cases/current/red-vote", post(cases::red_vote))
        .route("/api/v1/cases/current/init-blue-vote", post(cases::init_blue_vote))
        .route("/api/v1/cases/current/blue-vote", post(cases::blue_vote))
        .route("/api/v1/cases/current/force-skip-discuss", post(cases::force_skip_discuss))
        .route("/api/v1/cases/:case_id/result", get(cases::case_result))
        .route("/rt/v1/sse/rooms/current", get(sse::room_state))
        .route("/rt/v1/sse/cases/current", get(sse::case_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
