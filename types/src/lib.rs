//! Common types shared by the spinpot round engine and its services.
//!
//! Amounts are decimal quantities carried as `f64`. Anything that compares amounts
//! uses [`AMOUNT_TOLERANCE`] rather than exact equality.

pub mod error;
pub mod round;

pub use error::WheelError;
pub use round::{
    BetReceipt, DisplayState, Participant, ParticipantView, Resolution, RoundPhase, Slice,
    TickReport,
};

/// Tolerance used when comparing amounts or angles.
pub const AMOUNT_TOLERANCE: f64 = 1e-9;

/// Degrees in one full turn of the wheel.
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Wrap `degrees` into `[0, 360)`.
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 360, which is folded back to 0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN_DEGREES);
    if wrapped >= FULL_TURN_DEGREES {
        0.0
    } else {
        wrapped
    }
}
