//! Spinpot round engine.
//!
//! This crate contains the state machine for a single wheel-of-fortune round and the
//! pure pieces it sequences: the stake ledger, the commission, the countdown, the
//! weighted draw and the wheel geometry.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time; the round only advances on [`RoundController::tick`].
//! - Do not draw randomness internally; callers supply `random_unit` or an `Rng`.
//! - Selection and slices walk participants in insertion order, never display order.
//!
//! ## Minimal round (example)
//! ```rust
//! use spinpot_execution::{RoundConfig, RoundController};
//!
//! let config = RoundConfig { round_seconds: 2, spin_ticks: 1, ..RoundConfig::default() };
//! let mut round = RoundController::new(config).unwrap();
//! round.place_bet("@you", 10.0).unwrap();
//! round.tick();
//! assert!(round.tick().locked);
//! let resolution = round.resolve(0.5).unwrap();
//! assert_eq!(resolution.winner, "@you");
//! round.tick();
//! assert_eq!(round.display_state().winner.as_deref(), Some("@you"));
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod fee;
pub mod geometry;
pub mod ledger;
pub mod selector;
pub mod sink;


pub use clock::{format_clock, ClockTick, RoundClock};
pub use config::{ConfigError, RoundConfig};
pub use controller::RoundController;
pub use fee::{apply_fee, FeeSplit};
pub use geometry::{compute_slices, WheelGeometry, POINTER_AT_TWELVE_OCLOCK};
pub use ledger::{StakeLedger, PALETTE};
pub use selector::{select_winner, Selection};
pub use sink::{FeedbackSink, NoopSink, RenderSink};
