use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    fee::DEFAULT_COMMISSION_RATE,
    geometry::{DEFAULT_MIN_FULL_SPINS, POINTER_AT_TWELVE_OCLOCK},
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u32 },
    #[error("commission_rate must be in [0, 1) (got {value})")]
    InvalidCommissionRate { value: f64 },
    #[error("pointer_offset must be finite (got {value})")]
    InvalidPointerOffset { value: f64 },
}

/// Round timing and economics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Countdown length in whole seconds (one tick each).
    pub round_seconds: u32,
    /// Commission deducted from every gross bet.
    pub commission_rate: f64,
    /// Whole turns added to every spin.
    pub min_full_spins: u32,
    /// Ticks spent in `Spinning` before the winner is announced.
    pub spin_ticks: u32,
    /// Drawing-coordinate angle of the pointer.
    pub pointer_offset: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_seconds: 45,
            commission_rate: DEFAULT_COMMISSION_RATE,
            min_full_spins: DEFAULT_MIN_FULL_SPINS,
            spin_ticks: 7,
            pointer_offset: POINTER_AT_TWELVE_OCLOCK,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "round_seconds",
                value: self.round_seconds,
            });
        }
        if self.spin_ticks == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "spin_ticks",
                value: self.spin_ticks,
            });
        }
        if !self.commission_rate.is_finite() || !(0.0..1.0).contains(&self.commission_rate) {
            return Err(ConfigError::InvalidCommissionRate {
                value: self.commission_rate,
            });
        }
        if !self.pointer_offset.is_finite() {
            return Err(ConfigError::InvalidPointerOffset {
                value: self.pointer_offset,
            });
        }
        Ok(())
    }

    /// Spin ticks needed to cover `spin_ms` at one tick per `tick_ms`, rounded up.
    pub fn spin_ticks_for(spin_ms: u64, tick_ms: u64) -> u32 {
        if tick_ms == 0 {
            return 1;
        }
        let ticks = spin_ms.div_ceil(tick_ms).max(1);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RoundConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.round_seconds, 45);
        assert_eq!(config.commission_rate, 0.05);
        assert_eq!(config.min_full_spins, 5);
    }

    #[test]
    fn test_validation() {
        let valid = RoundConfig::default();

        let no_countdown = RoundConfig {
            round_seconds: 0,
            ..valid
        };
        assert_eq!(
            no_countdown.validate(),
            Err(ConfigError::InvalidNonZero {
                field: "round_seconds",
                value: 0
            })
        );

        let no_spin = RoundConfig {
            spin_ticks: 0,
            ..valid
        };
        assert!(no_spin.validate().is_err());

        let full_commission = RoundConfig {
            commission_rate: 1.0,
            ..valid
        };
        assert!(full_commission.validate().is_err());

        let bad_pointer = RoundConfig {
            pointer_offset: f64::NAN,
            ..valid
        };
        assert!(bad_pointer.validate().is_err());
    }

    #[test]
    fn test_spin_ticks_for() {
        assert_eq!(RoundConfig::spin_ticks_for(6_500, 1_000), 7);
        assert_eq!(RoundConfig::spin_ticks_for(6_000, 1_000), 6);
        assert_eq!(RoundConfig::spin_ticks_for(0, 1_000), 1);
        assert_eq!(RoundConfig::spin_ticks_for(500, 0), 1);
    }
}
