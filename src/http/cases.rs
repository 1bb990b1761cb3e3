//! Case phase actions and the finished-case result lookup.
//!
//! Action handlers accept or reject against a fixed mock context; real
//! phase state will replace the flags below once cases persist. A 200 only
//! means the action was accepted. The resulting state change arrives over
//! the case_state stream.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::{uuid, Uuid};

use crate::domain::{seat_in_range, PhaseType};
use crate::http::envelope::{ApiError, Envelope};

// Mock context shared by every action until auth/session wiring reaches
// room and case state. Seats 6 and 7 stay empty so the 404 path is
// exercisable.
const SELF_SEAT_NO: u8 = 0;
const OCCUPIED_SEATS: [u8; 6] = [0, 1, 2, 3, 4, 5];
const IN_ROOM: bool = true;
const HAS_CURRENT_CASE: bool = true;
const ALREADY_DECIDED: bool = false;
const CURRENT_PHASE: PhaseType = PhaseType::Night;
const DISCUSS_HAS_TOKEN_FOR_INIT: bool = true;
const VOTE_HAS_TOKEN: bool = true;

const NOT_IN_ROOM_MESSAGE: &str = "The user is not in a room.";
const NO_CASE_MESSAGE: &str = "There is no case in progress.";

// Receipt phase ids are fixed per endpoint so clients can tell the stubs
// apart; skips use the default id.
const DEFAULT_PHASE_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000001");
const RED_VOTE_PHASE_ID: Uuid = uuid!("00000000-0000-0000-0000-0000000000aa");
const INIT_BLUE_VOTE_PHASE_ID: Uuid = uuid!("00000000-0000-0000-0000-0000000000bb");
const BLUE_VOTE_PHASE_ID: Uuid = uuid!("00000000-0000-0000-0000-0000000000cc");
const FORCE_SKIP_PHASE_ID: Uuid = uuid!("00000000-0000-0000-0000-0000000000dd");

/// Acknowledges an accepted action. `action_id` increases monotonically
/// within a case (fixed to 1 while actions are stubbed).
#[derive(Debug, Serialize)]
pub struct ActionReceipt {
    pub action_id: u64,
    pub phase_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub accepted_at: OffsetDateTime,
}

impl ActionReceipt {
    fn accepted(phase_id: Uuid) -> Self {
        Self {
            action_id: 1,
            phase_id,
            accepted_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RedVoteRequest {
    /// Null (or absent) means skip.
    #[serde(default)]
    pub target_seat_no: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct InitBlueVoteRequest {
    pub target_seat_no: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlueVoteChoice {
    Yes,
    No,
    Skip,
}

#[derive(Debug, Deserialize)]
pub struct BlueVoteRequest {
    pub choice: BlueVoteChoice,
}

/// Context gate every action passes first: room membership, a current
/// case, no decision recorded yet, and the expected phase, in that order.
fn check_action_context(expected_phase: PhaseType) -> Result<(), ApiError> {
    if !IN_ROOM {
        return Err(ApiError::with_message(
            StatusCode::FORBIDDEN,
            "PERMISSION_DENIED_NOT_IN_ROOM",
            NOT_IN_ROOM_MESSAGE,
        ));
    }
    if !HAS_CURRENT_CASE {
        return Err(ApiError::with_message(
            StatusCode::FORBIDDEN,
            "PERMISSION_DENIED_NOT_IN_CASE",
            NO_CASE_MESSAGE,
        ));
    }
    if ALREADY_DECIDED {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "PHASE_REJECTED_ALREADY_DECIDED",
        ));
    }
    if CURRENT_PHASE != expected_phase {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "PHASE_REJECTED_CONFLICT_ACTION",
        ));
    }
    Ok(())
}

/// Targets a seat during NIGHT, or skips when the seat is null.
pub async fn red_vote(
    WithRejection(Json(body), _): WithRejection<Json<RedVoteRequest>, ApiError>,
) -> Result<Envelope<ActionReceipt>, ApiError> {
    check_action_context(PhaseType::Night)?;

    if let Some(target) = body.target_seat_no {
        if !seat_in_range(target) {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "INVALID_TARGET_SEAT_NO",
            ));
        }
    }
    let Some(target) = body.target_seat_no else {
        return Ok(Envelope::ok(ActionReceipt::accepted(DEFAULT_PHASE_ID)));
    };
    if target == SELF_SEAT_NO {
        return Err(ApiError::new(StatusCode::CONFLICT, "NIGHT_REJECTED_SELF_VOTE"));
    }
    if !OCCUPIED_SEATS.contains(&target) {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "TARGET_SEAT_EMPTY"));
    }
    Ok(Envelope::ok(ActionReceipt::accepted(RED_VOTE_PHASE_ID)))
}

/// Nominates a blue-vote target during DISCUSS to open a VOTE phase.
pub async fn init_blue_vote(
    WithRejection(Json(body), _): WithRejection<Json<InitBlueVoteRequest>, ApiError>,
) -> Result<Envelope<ActionReceipt>, ApiError> {
    check_action_context(PhaseType::Discuss)?;

    let target = body.target_seat_no;
    if !seat_in_range(target) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_TARGET_SEAT_NO",
        ));
    }
    if !DISCUSS_HAS_TOKEN_FOR_INIT {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "DISCUSS_REJECTED_NO_TOKEN_INIT",
        ));
    }
    if target == SELF_SEAT_NO {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "DISCUSS_REJECTED_SELF_VOTE_INIT",
        ));
    }
    if !OCCUPIED_SEATS.contains(&target) {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "TARGET_SEAT_EMPTY"));
    }
    Ok(Envelope::ok(ActionReceipt::accepted(INIT_BLUE_VOTE_PHASE_ID)))
}

/// Casts YES / NO / SKIP on the current VOTE target. The stub records the
/// choice nowhere; it only validates and acknowledges.
pub async fn blue_vote(
    WithRejection(Json(_body), _): WithRejection<Json<BlueVoteRequest>, ApiError>,
) -> Result<Envelope<ActionReceipt>, ApiError> {
    check_action_context(PhaseType::Vote)?;

    if !VOTE_HAS_TOKEN {
        return Err(ApiError::new(StatusCode::CONFLICT, "VOTE_REJECTED_NO_TOKEN"));
    }
    Ok(Envelope::ok(ActionReceipt::accepted(BLUE_VOTE_PHASE_ID)))
}

/// Ends DISCUSS early and moves the case toward NIGHT. No host check yet.
pub async fn force_skip_discuss() -> Result<Envelope<ActionReceipt>, ApiError> {
    check_action_context(PhaseType::Discuss)?;

    Ok(Envelope::ok(ActionReceipt::accepted(FORCE_SKIP_PHASE_ID)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    Red,
    Blue,
}

#[derive(Debug, Serialize)]
pub struct CaseResultPlayer {
    pub seat_no: u8,
    pub team: Team,
}

#[derive(Debug, Serialize)]
pub struct CaseResult {
    pub winner: Team,
    pub players: Vec<CaseResultPlayer>,
}

// Sentinels stand in for lookups until cases persist: the zero id reads as
// unknown, `...0001` as still running.
const NOT_FOUND_CASE_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000000");
const RUNNING_CASE_ID: Uuid = uuid!("00000000-0000-0000-0000-000000000001");

pub async fn case_result(
    WithRejection(Path(case_id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<Envelope<CaseResult>, ApiError> {
    if case_id == NOT_FOUND_CASE_ID {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "CASE_NOT_FOUND"));
    }
    if case_id == RUNNING_CASE_ID {
        return Err(ApiError::new(StatusCode::CONFLICT, "CASE_RUNNING"));
    }
    Ok(Envelope::ok(CaseResult {
        winner: Team::Blue,
        players: vec![
            CaseResultPlayer { seat_no: 0, team: Team::Blue },
            CaseResultPlayer { seat_no: 1, team: Team::Red },
            CaseResultPlayer { seat_no: 2, team: Team::Blue },
            CaseResultPlayer { seat_no: 3, team: Team::Red },
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_night_phase_passes_the_context_gate() {
        assert!(check_action_context(PhaseType::Night).is_ok());
        for phase in [PhaseType::Discuss, PhaseType::Vote] {
            let err = check_action_context(phase).unwrap_err();
            assert_eq!(err.status, StatusCode::CONFLICT);
            assert_eq!(err.code, "PHASE_REJECTED_CONFLICT_ACTION");
        }
    }

    #[test]
    fn receipts_serialize_with_utc_timestamps() {
        let value = serde_json::to_value(ActionReceipt::accepted(RED_VOTE_PHASE_ID)).unwrap();
        assert_eq!(value["action_id"], 1);
        assert_eq!(
            value["phase_id"],
            "00000000-0000-0000-0000-0000000000aa"
        );
        assert!(value["accepted_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn blue_vote_choice_accepts_the_three_ballots() {
        for (raw, want) in [
            ("\"YES\"", BlueVoteChoice::Yes),
            ("\"NO\"", BlueVoteChoice::No),
            ("\"SKIP\"", BlueVoteChoice::Skip),
        ] {
            let parsed: BlueVoteChoice = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, want);
        }
        assert!(serde_json::from_str::<BlueVoteChoice>("\"MAYBE\"").is_err());
    }
}
