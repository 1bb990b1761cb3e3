//! Room and case snapshots carried by the state streams.
//!
//! A snapshot is the single source of truth for client rendering; the
//! stream never sends diffs. Default values double as the wire fixtures
//! while room and case state are stubbed.

use serde::Serialize;
use uuid::{uuid, Uuid};

use crate::domain::{CaseStatus, PhaseType, VoteFailReason, VoteType};

/// Fixed instant used by fixtures. Timestamps in snapshots are ISO 8601
/// UTC strings with millisecond precision, always ending in `Z`.
pub const FIXED_UTC_ISO: &str = "1970-01-01T00:00:00.000Z";

#[derive(Debug, Clone, Serialize)]
pub struct RoomInfo {
    pub id: u32,
    pub room_name: String,
    pub host_user_id: Uuid,
    pub created_at: String,
}

impl Default for RoomInfo {
    fn default() -> Self {
        Self {
            id: 1,
            room_name: "test_room".to_owned(),
            host_user_id: Uuid::nil(),
            created_at: FIXED_UTC_ISO.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamPolicy {
    Random,
    Fixed,
}

/// Play rules for a room. `discuss_duration_sec` of zero means unlimited.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSettings {
    pub max_players: u8,
    pub team_policy: TeamPolicy,
    pub full_life: u8,
    pub max_vote_phases_per_round: u8,
    pub night_duration_sec: u32,
    pub vote_duration_sec: u32,
    pub discuss_duration_sec: u32,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            max_players: 8,
            team_policy: TeamPolicy::Random,
            full_life: 2,
            max_vote_phases_per_round: 2,
            night_duration_sec: 30,
            vote_duration_sec: 30,
            discuss_duration_sec: 120,
        }
    }
}

/// A null `case_id` means no case, and `status` must then be null too.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomCurrentCase {
    pub case_id: Option<Uuid>,
    pub status: Option<CaseStatus>,
}

/// Active member entry; ordering follows join time ascending.
#[derive(Debug, Clone, Serialize)]
pub struct RoomMember {
    pub user_id: Uuid,
    pub username: String,
    pub joined_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomSnapshot {
    pub room: RoomInfo,
    pub settings: RoomSettings,
    pub current_case: RoomCurrentCase,
    pub members: Vec<RoomMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseState {
    pub case_id: Uuid,
    pub status: CaseStatus,
    pub round_no: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseState {
    pub phase_id: Uuid,
    pub history_id: u32,
    pub phase_type: PhaseType,
    pub seq_in_round: u32,
    pub phase_no_in_round: u32,
    pub opened_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CasePlayer {
    pub username: String,
    pub seat_no: u8,
    pub life_lost: u8,
    pub vote_tokens: u8,
    pub eliminated: bool,
}

/// The night phase publishes nothing beyond the shared state yet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NightPhaseInfo {}

#[derive(Debug, Clone, Serialize)]
pub struct VotePhaseInfo {
    pub targeter_seat_no: u8,
    pub targeted_seat_no: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscussPhaseInfo {
    pub player_damaged: Option<u8>,
    pub blue_vote_left: u8,
    pub last_vote_type: VoteType,
    pub fail_reason: VoteFailReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseSnapshot {
    pub schema_version: u32,
    pub case_state: CaseState,
    pub phase_state: PhaseState,
    pub players: Vec<CasePlayer>,
    pub night_phase_info: NightPhaseInfo,
    pub vote_phase_info: VotePhaseInfo,
    pub discuss_phase_info: DiscussPhaseInfo,
    pub logs: Vec<String>,
}

impl Default for CaseSnapshot {
    /// Fixture: a fresh case sitting in its first NIGHT phase, six of the
    /// eight seats taken, nothing decided yet.
    fn default() -> Self {
        Self {
            schema_version: 1,
            case_state: CaseState {
                case_id: Uuid::nil(),
                status: CaseStatus::Running,
                round_no: 0,
            },
            phase_state: PhaseState {
                phase_id: uuid!("00000000-0000-0000-0000-000000000001"),
                history_id: 0,
                phase_type: PhaseType::Night,
                seq_in_round: 0,
                phase_no_in_round: 0,
                opened_at: FIXED_UTC_ISO.to_owned(),
            },
            players: (0..6)
                .map(|seat| CasePlayer {
                    username: format!("player_{seat}"),
                    seat_no: seat,
                    life_lost: 0,
                    vote_tokens: 2,
                    eliminated: false,
                })
                .collect(),
            night_phase_info: NightPhaseInfo::default(),
            vote_phase_info: VotePhaseInfo {
                targeter_seat_no: 0,
                targeted_seat_no: 0,
            },
            discuss_phase_info: DiscussPhaseInfo {
                player_damaged: None,
                blue_vote_left: 2,
                last_vote_type: VoteType::RedVote,
                fail_reason: VoteFailReason::NoVote,
            },
            logs: Vec::new(),
        }
    }
}
