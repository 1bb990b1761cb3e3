//! Shared game-domain types and constants.

use serde::{Deserialize, Serialize};

/// Seat numbers are `SEAT_NO_MIN <= n < SEAT_NO_MAX_EXCLUSIVE`.
pub const SEAT_NO_MIN: u8 = 0;
pub const SEAT_NO_MAX_EXCLUSIVE: u8 = 8;

/// Range check shared by every action request that carries a seat.
pub fn seat_in_range(seat: u8) -> bool {
    (SEAT_NO_MIN..SEAT_NO_MAX_EXCLUSIVE).contains(&seat)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Running,
    Ended,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseType {
    Night,
    Discuss,
    Vote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteType {
    RedVote,
    BlueVote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteFailReason {
    Tie,
    SoloVote,
    NoVote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_range_covers_eight_seats() {
        assert!(seat_in_range(0));
        assert!(seat_in_range(7));
        assert!(!seat_in_range(8));
        assert!(!seat_in_range(255));
    }
}
