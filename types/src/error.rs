use thiserror::Error;

use crate::RoundPhase;

/// Errors surfaced synchronously by round operations.
///
/// Every operation that returns one of these leaves the round untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: f64 },
    #[error("fee rate must be in [0, 1) (got {rate})")]
    InvalidFeeRate { rate: f64 },
    #[error("round is closed to bets (phase={phase})")]
    RoundClosed { phase: RoundPhase },
    #[error("pot is empty")]
    EmptyPot,
    #[error("random unit must be in [0, 1) (got {value})")]
    InvalidRandomUnit { value: f64 },
    #[error("expected phase {expected}, round is {actual}")]
    PhaseMismatch {
        expected: RoundPhase,
        actual: RoundPhase,
    },
}

impl WheelError {
    /// Stable code for observers that want something shorter than the message.
    pub fn code(&self) -> &'static str {
        match self {
            WheelError::InvalidAmount { .. } => "INVALID_AMOUNT",
            WheelError::InvalidFeeRate { .. } => "INVALID_FEE_RATE",
            WheelError::RoundClosed { .. } => "ROUND_CLOSED",
            WheelError::EmptyPot => "EMPTY_POT",
            WheelError::InvalidRandomUnit { .. } => "INVALID_RANDOM_UNIT",
            WheelError::PhaseMismatch { .. } => "PHASE_MISMATCH",
        }
    }
}
