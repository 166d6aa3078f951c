use futures::{channel::mpsc, StreamExt};
use rand::{rngs::StdRng, SeedableRng};
use spinpot_execution::{ConfigError, RoundController};
use spinpot_types::RoundPhase;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{ingress::Message, Config, Event, Mailbox, TickOutcome};
use crate::{
    activity::ActivityPolicy,
    sinks::{TracingFeedback, TracingRender},
};

/// Owns the round. All bets and ticks arrive through one mailbox and are applied in
/// order, so a bet can never interleave with the lock.
pub struct Actor<P: ActivityPolicy> {
    round: RoundController,
    activity: P,
    rng: StdRng,
    mailbox: mpsc::Receiver<Message>,
    events: mpsc::UnboundedSender<Event>,
}

impl<P: ActivityPolicy + 'static> Actor<P> {
    pub fn new(
        config: Config<P>,
    ) -> Result<(Self, Mailbox, mpsc::UnboundedReceiver<Event>), ConfigError> {
        let round = RoundController::new(config.round)?
            .with_feedback(TracingFeedback)
            .with_render(TracingRender);
        let (sender, mailbox) = mpsc::channel(config.mailbox_size);
        let (events, observer) = mpsc::unbounded();
        Ok((
            Self {
                round,
                activity: config.activity,
                rng: StdRng::seed_from_u64(config.seed),
                mailbox,
                events,
            },
            Mailbox::new(sender),
            observer,
        ))
    }

    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        while let Some(message) = self.mailbox.next().await {
            match message {
                Message::PlaceBet {
                    identity,
                    gross,
                    response,
                } => {
                    let result = self.round.place_bet(&identity, gross);
                    if let Err(err) = &result {
                        debug!(%identity, gross, ?err, "bet rejected");
                    } else {
                        self.emit_state();
                    }
                    let _ = response.send(result);
                }
                Message::Credit {
                    identity,
                    net,
                    response,
                } => {
                    let result = self.round.credit_stake(&identity, net);
                    if result.is_ok() {
                        self.emit_state();
                    }
                    let _ = response.send(result);
                }
                Message::Tick { response } => {
                    let outcome = self.handle_tick();
                    if let Some(response) = response {
                        let _ = response.send(outcome);
                    }
                }
                Message::Display { response } => {
                    let _ = response.send(self.round.display_state());
                }
                Message::NextRound { response } => {
                    let result = self.round.next_round();
                    if result.is_ok() {
                        self.emit_state();
                    }
                    let _ = response.send(result);
                }
            }
        }
        debug!("table mailbox closed; actor exiting");
    }

    fn handle_tick(&mut self) -> TickOutcome {
        let report = self.round.tick();
        let mut outcome = TickOutcome {
            report,
            resolution: None,
            error: None,
        };

        if outcome.report.phase == RoundPhase::Open {
            if let Some(bet) = self.activity.on_tick(self.round.ledger().participants()) {
                match self.round.credit_stake(&bet.identity, bet.amount) {
                    Ok(stake) => {
                        debug!(identity = %bet.identity, amount = bet.amount, stake, "simulated bet")
                    }
                    Err(err) => warn!(identity = %bet.identity, ?err, "simulated bet rejected"),
                }
            }
        }

        match outcome.report.entered {
            Some(RoundPhase::Locked) => match self.round.resolve_with(&mut self.rng) {
                Ok(resolution) => {
                    outcome.report.phase = self.round.phase();
                    outcome.report.label = self.round.label();
                    self.emit(Event::Spinning(resolution.clone()));
                    outcome.resolution = Some(resolution);
                }
                Err(err) => {
                    warn!(round_id = self.round.round_id(), ?err, "round stalled at lock");
                    self.emit(Event::Stalled {
                        code: err.code(),
                        message: err.to_string(),
                    });
                    outcome.error = Some(err);
                }
            },
            Some(RoundPhase::Resolved) => {
                if let Some(resolution) = self.round.resolution() {
                    self.emit(Event::Resolved(resolution.clone()));
                }
            }
            _ => {}
        }

        self.emit_state();
        outcome
    }

    fn emit_state(&self) {
        self.emit(Event::State(self.round.display_state()));
    }

    fn emit(&self, event: Event) {
        // Nobody listening is fine.
        let _ = self.events.unbounded_send(event);
    }
}
