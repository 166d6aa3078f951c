use std::str::FromStr;

use serde::Serialize;
use spinpot_execution::RoundConfig;
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Round(#[from] spinpot_execution::ConfigError),
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("activity_probability must be in [0, 1] (got {value})")]
    InvalidProbability { value: f64 },
    #[error("player must not be empty")]
    EmptyPlayer,
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
}

/// Service settings, read from `SPINPOT_*` environment variables.
#[derive(Clone, Debug, Serialize)]
pub struct LiveWheelConfig {
    pub round_seconds: u32,
    pub commission_rate: f64,
    pub min_full_spins: u32,
    pub spin_ms: u64,
    pub tick_ms: u64,
    pub activity_probability: f64,
    pub seed: u64,
    pub demo_players: bool,
    pub player: String,
    pub log_level: String,
    pub mailbox_size: usize,
}

impl Default for LiveWheelConfig {
    fn default() -> Self {
        let round = RoundConfig::default();
        Self {
            round_seconds: round.round_seconds,
            commission_rate: round.commission_rate,
            min_full_spins: round.min_full_spins,
            spin_ms: 6_500,
            tick_ms: 1_000,
            activity_probability: 0.2,
            seed: 42,
            demo_players: true,
            player: "@you".to_string(),
            log_level: "info".to_string(),
            mailbox_size: 1_024,
        }
    }
}

impl LiveWheelConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            round_seconds: read(&lookup, "SPINPOT_ROUND_SECONDS", defaults.round_seconds),
            commission_rate: read(&lookup, "SPINPOT_COMMISSION_RATE", defaults.commission_rate),
            min_full_spins: read(&lookup, "SPINPOT_MIN_FULL_SPINS", defaults.min_full_spins),
            spin_ms: read(&lookup, "SPINPOT_SPIN_MS", defaults.spin_ms),
            tick_ms: read(&lookup, "SPINPOT_TICK_MS", defaults.tick_ms),
            activity_probability: read(
                &lookup,
                "SPINPOT_ACTIVITY_PROBABILITY",
                defaults.activity_probability,
            ),
            seed: read(&lookup, "SPINPOT_SEED", defaults.seed),
            demo_players: read(&lookup, "SPINPOT_DEMO_PLAYERS", defaults.demo_players),
            player: lookup("SPINPOT_PLAYER").unwrap_or(defaults.player),
            log_level: lookup("SPINPOT_LOG_LEVEL").unwrap_or(defaults.log_level),
            mailbox_size: read(&lookup, "SPINPOT_MAILBOX_SIZE", defaults.mailbox_size),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.round_config().validate()?;
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "tick_ms",
                value: self.tick_ms,
            });
        }
        if self.mailbox_size == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "mailbox_size",
                value: 0,
            });
        }
        if !(0.0..=1.0).contains(&self.activity_probability) {
            return Err(ConfigError::InvalidProbability {
                value: self.activity_probability,
            });
        }
        if self.player.trim().is_empty() {
            return Err(ConfigError::EmptyPlayer);
        }
        self.log_level()?;
        Ok(())
    }

    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            round_seconds: self.round_seconds,
            commission_rate: self.commission_rate,
            min_full_spins: self.min_full_spins,
            spin_ticks: RoundConfig::spin_ticks_for(self.spin_ms, self.tick_ms),
            ..RoundConfig::default()
        }
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
            value: self.log_level.clone(),
        })
    }
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: T) -> T {
    lookup(key)
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_round_defaults() {
        let config = LiveWheelConfig::from_lookup(|_| None);
        assert!(config.validate().is_ok());
        let round = config.round_config();
        assert_eq!(round.round_seconds, 45);
        assert_eq!(round.spin_ticks, 7);
        assert_eq!(config.player, "@you");
    }

    #[test]
    fn test_env_overrides() {
        let config = LiveWheelConfig::from_lookup(lookup(&[
            ("SPINPOT_ROUND_SECONDS", "10"),
            ("SPINPOT_SPIN_MS", "1000"),
            ("SPINPOT_TICK_MS", "250"),
            ("SPINPOT_DEMO_PLAYERS", "false"),
            ("SPINPOT_PLAYER", "@me"),
        ]));
        assert_eq!(config.round_seconds, 10);
        assert!(!config.demo_players);
        assert_eq!(config.player, "@me");
        assert_eq!(config.round_config().spin_ticks, 4);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = LiveWheelConfig::from_lookup(lookup(&[
            ("SPINPOT_ROUND_SECONDS", "soon"),
            ("SPINPOT_SEED", "-1"),
        ]));
        assert_eq!(config.round_seconds, 45);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validation() {
        let config = LiveWheelConfig {
            activity_probability: 1.5,
            ..LiveWheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));

        let config = LiveWheelConfig {
            round_seconds: 0,
            ..LiveWheelConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Round(_))));

        let config = LiveWheelConfig {
            log_level: "loud".to_string(),
            ..LiveWheelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));

        let config = LiveWheelConfig {
            player: " ".to_string(),
            ..LiveWheelConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPlayer)));
    }
}
