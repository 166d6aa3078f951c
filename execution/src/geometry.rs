//! Wheel slices and spin targeting.
//!
//! ## Coordinate system
//!
//! Slices are laid out in drawing coordinates: angle 0 points at 3 o'clock and angles
//! grow clockwise, so 90° is 6 o'clock, 180° is 9 o'clock and 270° is 12 o'clock.
//! Rotating the wheel by `R` degrees clockwise moves a wheel angle `θ` to `θ + R`.
//!
//! The pointer is fixed at 12 o'clock, i.e. at [`POINTER_AT_TWELVE_OCLOCK`] in drawing
//! coordinates. The wheel angle under the pointer for rotation `R` is therefore
//! `(pointer - R) mod 360`, and landing a slice center `c` under the pointer requires
//! `R ≡ pointer - c (mod 360)`.

use spinpot_types::{normalize_degrees, Participant, Slice, FULL_TURN_DEGREES};

/// Drawing-coordinate angle of a pointer at 12 o'clock.
pub const POINTER_AT_TWELVE_OCLOCK: f64 = 270.0;

/// Full turns added to every spin by default.
pub const DEFAULT_MIN_FULL_SPINS: u32 = 5;

/// Slices in insertion order, each `stake / pot * 360` wide.
///
/// The last slice ends exactly at 360 so the slices partition `[0, 360)`. Returns an
/// empty list when `pot` is not positive.
pub fn compute_slices(participants: &[Participant], pot: f64) -> Vec<Slice> {
    if participants.is_empty() || pot.is_nan() || pot <= 0.0 {
        return Vec::new();
    }
    let last = participants.len() - 1;
    let mut accumulated = 0.0;
    participants
        .iter()
        .enumerate()
        .map(|(idx, participant)| {
            let start = accumulated / pot * FULL_TURN_DEGREES;
            accumulated += participant.stake;
            let end = if idx == last {
                FULL_TURN_DEGREES
            } else {
                accumulated / pot * FULL_TURN_DEGREES
            };
            Slice {
                identity: participant.identity.clone(),
                start,
                end,
                color: participant.color.clone(),
            }
        })
        .collect()
}

/// Pure spin math relative to a fixed pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGeometry {
    pointer_offset: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(POINTER_AT_TWELVE_OCLOCK)
    }
}

impl WheelGeometry {
    pub fn new(pointer_offset: f64) -> Self {
        Self { pointer_offset }
    }

    pub fn pointer_offset(&self) -> f64 {
        self.pointer_offset
    }

    /// Rotation that puts wheel angle 0 under the pointer (-90° for a 12 o'clock pointer).
    pub fn initial_rotation(&self) -> f64 {
        self.pointer_offset - FULL_TURN_DEGREES
    }

    /// Wheel angle, in `[0, 360)`, sitting under the pointer at `rotation`.
    pub fn angle_under_pointer(&self, rotation: f64) -> f64 {
        normalize_degrees(self.pointer_offset - rotation)
    }

    /// Absolute rotation landing the center of `[slice_start, slice_end)` under the
    /// pointer after at least `min_full_spins` whole turns past `previous_rotation`.
    ///
    /// Never returns less than `previous_rotation`, so the wheel only spins forward.
    pub fn target_rotation(
        &self,
        slice_start: f64,
        slice_end: f64,
        previous_rotation: f64,
        min_full_spins: u32,
    ) -> f64 {
        let center = (slice_start + slice_end) / 2.0;
        let base = previous_rotation + f64::from(min_full_spins) * FULL_TURN_DEGREES;
        let delta = normalize_degrees(self.pointer_offset - center - base);
        base + delta
    }
}
