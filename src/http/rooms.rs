//! Room membership endpoints.
//!
//! These are contract stubs: each handler answers with a fixed mutation so
//! clients can integrate against the final shapes before real membership
//! tracking lands. Domain-level outcomes ride in `changed` and `reason`;
//! the HTTP status only reports transport-level success.

use axum::extract::Path;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::seat_in_range;
use crate::http::envelope::{ApiError, Envelope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationTarget {
    Room,
    Case,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationSubject {
    Me,
    User,
}

/// Shared mutation payload.
///
/// `subject_id` identifies the subject when it is `USER` and is null for
/// `ME`. `on_target` says whether the subject belongs to the target after
/// the request; `changed` whether this request caused the transition.
#[derive(Debug, Serialize)]
pub struct Mutation<R> {
    pub target: MutationTarget,
    pub subject: MutationSubject,
    pub subject_id: Option<Uuid>,
    pub on_target: bool,
    pub changed: bool,
    pub reason: R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinRoomReason {
    Joined,
    AlreadyJoined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveRoomReason {
    Left,
    AlreadyLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KickUserReason {
    Kicked,
    NotInRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStartReason {
    Started,
}

#[derive(Debug, Deserialize)]
pub struct CaseStartRequest {
    pub red_player_count: Option<u8>,
}

/// Joining an already-joined room still answers 200, with `changed` false.
/// The stub reports a fresh join for any well-formed room id.
pub async fn join_room(
    WithRejection(Path(_room_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Envelope<Mutation<JoinRoomReason>> {
    Envelope::ok(Mutation {
        target: MutationTarget::Room,
        subject: MutationSubject::Me,
        subject_id: None,
        on_target: true,
        changed: true,
        reason: JoinRoomReason::Joined,
    })
}

pub async fn leave_room() -> Envelope<Mutation<LeaveRoomReason>> {
    Envelope::ok(Mutation {
        target: MutationTarget::Room,
        subject: MutationSubject::Me,
        subject_id: None,
        on_target: false,
        changed: true,
        reason: LeaveRoomReason::Left,
    })
}

/// Only guarantees the target is out of this room afterwards. The stub
/// reports the target was not a member to begin with.
pub async fn kick_user(
    WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Envelope<Mutation<KickUserReason>> {
    Envelope::ok(Mutation {
        target: MutationTarget::Room,
        subject: MutationSubject::User,
        subject_id: Some(user_id),
        on_target: false,
        changed: false,
        reason: KickUserReason::NotInRoom,
    })
}

/// Declared to fail with 403 (not in room, not host) or 409 (case running,
/// not enough players, not all ready, room deleted); the stub always starts.
pub async fn case_start(
    WithRejection(Json(body), _): WithRejection<Json<CaseStartRequest>, ApiError>,
) -> Result<Envelope<Mutation<CaseStartReason>>, ApiError> {
    if let Some(count) = body.red_player_count {
        if !seat_in_range(count) {
            return Err(ApiError::validation());
        }
    }
    Ok(Envelope::ok(Mutation {
        target: MutationTarget::Room,
        subject: MutationSubject::Me,
        subject_id: None,
        on_target: true,
        changed: true,
        reason: CaseStartReason::Started,
    }))
}
