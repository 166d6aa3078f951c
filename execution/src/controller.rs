//! Round state machine.
//!
//! ## Phases
//!
//! 1. **Open** - bets accepted, countdown running
//! 2. **Locked** - countdown hit zero, waiting for the draw
//! 3. **Spinning** - winner fixed, wheel animating for `spin_ticks` ticks
//! 4. **Resolved** - winner announced; [`RoundController::next_round`] starts over
//!
//! The winner is drawn on entry to `Spinning`. The spin duration only delays the
//! announcement and has no influence on the outcome.
//!
//! Every method that returns an error leaves the round unchanged.

use rand::Rng;
use spinpot_types::{
    BetReceipt, DisplayState, Resolution, RoundPhase, TickReport, WheelError,
};
use tracing::{debug, info, warn};

use crate::{
    clock::{format_clock, RoundClock},
    config::{ConfigError, RoundConfig},
    fee::apply_fee,
    geometry::{compute_slices, WheelGeometry},
    ledger::StakeLedger,
    selector::select_winner,
    sink::{FeedbackSink, NoopSink, RenderSink},
};

const ROLLING_LABEL: &str = "ROLLING...";
const WINNER_LABEL: &str = "WINNER!";

pub struct RoundController {
    config: RoundConfig,
    geometry: WheelGeometry,
    round_id: u64,
    phase: RoundPhase,
    ledger: StakeLedger,
    clock: RoundClock,
    rotation: f64,
    spin_remaining: u32,
    fees_collected: f64,
    resolution: Option<Resolution>,
    feedback: Box<dyn FeedbackSink>,
    render: Box<dyn RenderSink>,
}

impl RoundController {
    /// Open round 1 with no sinks attached.
    pub fn new(config: RoundConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = WheelGeometry::new(config.pointer_offset);
        Ok(Self {
            config,
            geometry,
            round_id: 1,
            phase: RoundPhase::Open,
            ledger: StakeLedger::new(),
            clock: RoundClock::new(config.round_seconds),
            rotation: geometry.initial_rotation(),
            spin_remaining: 0,
            fees_collected: 0.0,
            resolution: None,
            feedback: Box::new(NoopSink),
            render: Box::new(NoopSink),
        })
    }

    pub fn with_feedback(mut self, feedback: impl FeedbackSink + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    pub fn with_render(mut self, render: impl RenderSink + 'static) -> Self {
        self.render = Box::new(render);
        self
    }

    /// Take a gross bet: deduct the commission and credit the net stake.
    pub fn place_bet(&mut self, identity: &str, gross: f64) -> Result<BetReceipt, WheelError> {
        self.ensure_open()?;
        let split = apply_fee(gross, self.config.commission_rate)?;
        let stake = self.ledger.add_stake(identity, split.net)?;
        self.fees_collected += split.fee;

        let receipt = BetReceipt {
            identity: identity.to_string(),
            net: split.net,
            fee: split.fee,
            stake,
        };
        debug!(
            round_id = self.round_id,
            identity,
            gross,
            net = split.net,
            fee = split.fee,
            pot = self.ledger.total_pot(),
            "bet placed"
        );
        self.feedback.bet_placed(&receipt);
        self.publish_slices();
        Ok(receipt)
    }

    /// Credit an already-net stake without commission (seeded or simulated players).
    pub fn credit_stake(&mut self, identity: &str, net: f64) -> Result<f64, WheelError> {
        self.ensure_open()?;
        let stake = self.ledger.add_stake(identity, net)?;
        debug!(round_id = self.round_id, identity, net, stake, "stake credited");
        self.publish_slices();
        Ok(stake)
    }

    /// Advance the round by one clock tick.
    pub fn tick(&mut self) -> TickReport {
        let mut entered = None;
        match self.phase {
            RoundPhase::Open => {
                if self.clock.tick().lock {
                    self.phase = RoundPhase::Locked;
                    entered = Some(RoundPhase::Locked);
                    info!(
                        round_id = self.round_id,
                        pot = self.ledger.total_pot(),
                        participants = self.ledger.len(),
                        "betting locked"
                    );
                }
            }
            RoundPhase::Locked | RoundPhase::Resolved => {}
            RoundPhase::Spinning => {
                self.spin_remaining = self.spin_remaining.saturating_sub(1);
                if self.spin_remaining == 0 {
                    self.phase = RoundPhase::Resolved;
                    entered = Some(RoundPhase::Resolved);
                    if let Some(resolution) = &self.resolution {
                        info!(
                            round_id = self.round_id,
                            winner = %resolution.winner,
                            prize = resolution.prize,
                            "round resolved"
                        );
                        self.feedback.round_resolved(resolution);
                    }
                }
            }
        }

        TickReport {
            round_id: self.round_id,
            phase: self.phase,
            remaining_seconds: self.clock.remaining(),
            locked: !self.phase.accepts_bets(),
            label: self.label(),
            entered,
        }
    }

    /// Draw the winner with a caller-supplied `random_unit` in `[0, 1)` and start the spin.
    pub fn resolve(&mut self, random_unit: f64) -> Result<Resolution, WheelError> {
        if self.phase != RoundPhase::Locked {
            return Err(WheelError::PhaseMismatch {
                expected: RoundPhase::Locked,
                actual: self.phase,
            });
        }
        let pot = self.ledger.total_pot();
        let participants = self.ledger.participants();
        let selection = match select_winner(participants, pot, random_unit) {
            Ok(selection) => selection,
            Err(err) => {
                warn!(round_id = self.round_id, pot, ?err, "draw failed");
                return Err(err);
            }
        };
        let slices = compute_slices(participants, pot);
        let slice = &slices[selection.index];
        let target_rotation = self.geometry.target_rotation(
            slice.start,
            slice.end,
            self.rotation,
            self.config.min_full_spins,
        );

        let resolution = Resolution {
            round_id: self.round_id,
            winner: slice.identity.clone(),
            winner_slice_start: slice.start,
            winner_slice_end: slice.end,
            target_rotation,
            ticket: selection.ticket,
            prize: pot,
            fees_collected: self.fees_collected,
        };

        self.rotation = target_rotation;
        self.phase = RoundPhase::Spinning;
        self.spin_remaining = self.config.spin_ticks;
        self.resolution = Some(resolution.clone());
        info!(
            round_id = self.round_id,
            winner = %resolution.winner,
            ticket = resolution.ticket,
            pot,
            target_rotation,
            "wheel spinning"
        );
        self.render.spin(target_rotation, self.config.spin_ticks);
        Ok(resolution)
    }

    /// [`Self::resolve`] with a unit drawn from `rng`.
    pub fn resolve_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Resolution, WheelError> {
        let random_unit: f64 = rng.gen();
        self.resolve(random_unit)
    }

    /// Discard the resolved round and open the next one. The wheel keeps its rotation.
    pub fn next_round(&mut self) -> Result<u64, WheelError> {
        if self.phase != RoundPhase::Resolved {
            return Err(WheelError::PhaseMismatch {
                expected: RoundPhase::Resolved,
                actual: self.phase,
            });
        }
        self.ledger.clear();
        self.clock.reset();
        self.fees_collected = 0.0;
        self.resolution = None;
        self.spin_remaining = 0;
        self.round_id = self.round_id.saturating_add(1);
        self.phase = RoundPhase::Open;
        info!(round_id = self.round_id, "round opened");
        self.publish_slices();
        Ok(self.round_id)
    }

    /// Snapshot for rendering. Does not mutate.
    pub fn display_state(&self) -> DisplayState {
        let pot = self.ledger.total_pot();
        DisplayState {
            round_id: self.round_id,
            phase: self.phase,
            label: self.label(),
            remaining_seconds: self.clock.remaining(),
            pot,
            rotation: self.rotation,
            slices: compute_slices(self.ledger.participants(), pot),
            participants: self.ledger.feed(),
            winner: self.resolution.as_ref().map(|r| r.winner.clone()),
        }
    }

    pub fn label(&self) -> String {
        match self.phase {
            RoundPhase::Open => format_clock(self.clock.remaining()),
            RoundPhase::Locked | RoundPhase::Spinning => ROLLING_LABEL.to_string(),
            RoundPhase::Resolved => WINNER_LABEL.to_string(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn pot(&self) -> f64 {
        self.ledger.total_pot()
    }

    pub fn ledger(&self) -> &StakeLedger {
        &self.ledger
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn fees_collected(&self) -> f64 {
        self.fees_collected
    }

    fn ensure_open(&self) -> Result<(), WheelError> {
        if !self.phase.accepts_bets() {
            return Err(WheelError::RoundClosed { phase: self.phase });
        }
        Ok(())
    }

    fn publish_slices(&mut self) {
        let pot = self.ledger.total_pot();
        let slices = compute_slices(self.ledger.participants(), pot);
        self.render.slices_changed(&slices, pot);
    }
}
