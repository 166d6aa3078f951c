use serde::{Deserialize, Serialize};
use std::fmt;

use crate::normalize_degrees;

/// Lifecycle of a single round.
///
/// Phases only move forward: `Open -> Locked -> Spinning -> Resolved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    /// Accepting bets while the countdown runs.
    Open,
    /// Countdown hit zero; no further bets.
    Locked,
    /// Winner drawn, wheel animating.
    Spinning,
    /// Winner announced. Terminal for the round instance.
    Resolved,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Open => "open",
            RoundPhase::Locked => "locked",
            RoundPhase::Spinning => "spinning",
            RoundPhase::Resolved => "resolved",
        }
    }

    pub fn accepts_bets(&self) -> bool {
        matches!(self, RoundPhase::Open)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stake holder in the current round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub identity: String,
    pub stake: f64,
    /// Cosmetic only; never consulted by selection.
    pub color: String,
}

/// Angular interval `[start, end)` owned by one participant, in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub identity: String,
    pub start: f64,
    pub end: f64,
    pub color: String,
}

impl Slice {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Closed-open containment of a wheel angle, normalized into `[0, 360)`.
    pub fn contains(&self, angle: f64) -> bool {
        let angle = normalize_degrees(angle);
        angle >= self.start && angle < self.end
    }
}

/// One row of the stake-descending feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub identity: String,
    pub stake: f64,
    pub share_percent: f64,
    pub color: String,
}

/// Result of a successful bet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetReceipt {
    pub identity: String,
    pub net: f64,
    pub fee: f64,
    /// Identity's total stake after this bet.
    pub stake: f64,
}

/// What a single clock tick did to the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub round_id: u64,
    pub phase: RoundPhase,
    pub remaining_seconds: u32,
    /// True once betting is closed (any phase past `Open`).
    pub locked: bool,
    /// `MM:SS` while open, otherwise a status label.
    pub label: String,
    /// Phase entered on this tick, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entered: Option<RoundPhase>,
}

/// Outcome of the draw, fixed at the moment the round starts spinning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub round_id: u64,
    pub winner: String,
    pub winner_slice_start: f64,
    pub winner_slice_end: f64,
    pub target_rotation: f64,
    pub ticket: f64,
    /// Whole pot goes to the winner.
    pub prize: f64,
    pub fees_collected: f64,
}

/// Everything a renderer needs for one frame. Produced by a pure read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub round_id: u64,
    pub phase: RoundPhase,
    pub label: String,
    pub remaining_seconds: u32,
    pub pot: f64,
    pub rotation: f64,
    pub slices: Vec<Slice>,
    pub participants: Vec<ParticipantView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(start: f64, end: f64) -> Slice {
        Slice {
            identity: "@a".to_string(),
            start,
            end,
            color: "#ef4444".to_string(),
        }
    }

    #[test]
    fn test_slice_center_and_width() {
        let s = slice(90.0, 180.0);
        assert_eq!(s.width(), 90.0);
        assert_eq!(s.center(), 135.0);
    }

    #[test]
    fn test_slice_contains_is_closed_open() {
        let s = slice(90.0, 180.0);
        assert!(s.contains(90.0));
        assert!(s.contains(179.999));
        assert!(!s.contains(180.0));
        assert!(s.contains(90.0 + 720.0));
        assert!(s.contains(-200.0)); // 160
        assert!(!s.contains(-180.0)); // 180
    }

    #[test]
    fn test_phase_accepts_bets() {
        assert!(RoundPhase::Open.accepts_bets());
        assert!(!RoundPhase::Locked.accepts_bets());
        assert!(!RoundPhase::Spinning.accepts_bets());
        assert!(!RoundPhase::Resolved.accepts_bets());
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        let json = serde_json::to_string(&RoundPhase::Spinning).unwrap();
        assert_eq!(json, "\"spinning\"");
    }

    #[test]
    fn test_display_state_field_names() {
        let state = DisplayState {
            round_id: 1,
            phase: RoundPhase::Open,
            label: "00:45".to_string(),
            remaining_seconds: 45,
            pot: 0.0,
            rotation: -90.0,
            slices: vec![],
            participants: vec![],
            winner: None,
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["roundId"], 1);
        assert_eq!(value["remainingSeconds"], 45);
        assert!(value.get("winner").is_none());
    }
}
