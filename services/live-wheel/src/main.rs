use anyhow::{anyhow, Context, Result};
use clap::Parser;
use futures::StreamExt;
use spinpot_live_wheel::{
    activity::{ActivityPolicy, NoActivity, RandomActivity},
    table::{Actor, Config, Event, Mailbox, Ticker},
    LiveWheelConfig, DEMO_PLAYERS,
};
use tracing::{debug, info, warn};

/// Run wheel rounds on a live tick source.
///
/// Every flag falls back to its `SPINPOT_*` environment variable, then to the default.
#[derive(Debug, Parser)]
#[command(name = "live-wheel", version)]
struct Args {
    /// Countdown length in seconds.
    #[arg(long)]
    round_seconds: Option<u32>,
    /// Commission rate deducted from every bet.
    #[arg(long)]
    commission_rate: Option<f64>,
    /// Minimum full wheel turns per spin.
    #[arg(long)]
    min_full_spins: Option<u32>,
    /// Spin animation length in milliseconds.
    #[arg(long)]
    spin_ms: Option<u64>,
    /// Tick cadence in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Chance per open tick of a simulated competing bet.
    #[arg(long)]
    activity_probability: Option<f64>,
    /// Seed for the draw and the activity simulator.
    #[arg(long)]
    seed: Option<u64>,
    /// Start each round with an empty table instead of the demo players.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_demo_players: bool,
    /// Identity used for `--bet`; never receives simulated bets.
    #[arg(long)]
    player: Option<String>,
    /// Gross bet placed by the player at the start of each round (repeatable).
    #[arg(long = "bet")]
    bets: Vec<f64>,
    /// Number of rounds to run.
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(&self, mut config: LiveWheelConfig) -> LiveWheelConfig {
        if let Some(value) = self.round_seconds {
            config.round_seconds = value;
        }
        if let Some(value) = self.commission_rate {
            config.commission_rate = value;
        }
        if let Some(value) = self.min_full_spins {
            config.min_full_spins = value;
        }
        if let Some(value) = self.spin_ms {
            config.spin_ms = value;
        }
        if let Some(value) = self.tick_ms {
            config.tick_ms = value;
        }
        if let Some(value) = self.activity_probability {
            config.activity_probability = value;
        }
        if let Some(value) = self.seed {
            config.seed = value;
        }
        if self.no_demo_players {
            config.demo_players = false;
        }
        if let Some(value) = &self.player {
            config.player = value.clone();
        }
        if let Some(value) = &self.log_level {
            config.log_level = value.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.apply(LiveWheelConfig::from_env());
    config.validate().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .init();
    info!(?config, "starting live wheel");

    if config.activity_probability > 0.0 {
        let activity = RandomActivity::new(
            config.activity_probability,
            config.player.clone(),
            config.seed.wrapping_add(1),
        );
        run(&config, &args, activity).await
    } else {
        run(&config, &args, NoActivity).await
    }
}

async fn run<P: ActivityPolicy + 'static>(
    config: &LiveWheelConfig,
    args: &Args,
    activity: P,
) -> Result<()> {
    let (actor, mut mailbox, mut events) = Actor::new(Config {
        round: config.round_config(),
        activity,
        seed: config.seed,
        mailbox_size: config.mailbox_size,
    })
    .context("failed to build round")?;
    let actor_handle = actor.start();

    seed_round(config, &args.bets, &mut mailbox).await?;
    let mut ticker = Ticker::spawn(mailbox.clone(), config.tick_ms);

    let mut completed = 0;
    while let Some(event) = events.next().await {
        match event {
            Event::State(state) => {
                debug!(
                    round_id = state.round_id,
                    phase = %state.phase,
                    label = %state.label,
                    pot = state.pot,
                    "table state"
                );
                for row in &state.participants {
                    debug!(
                        identity = %row.identity,
                        stake = row.stake,
                        share = %format!("{:.1}%", row.share_percent),
                        "feed"
                    );
                }
            }
            Event::Spinning(resolution) => {
                info!(
                    round_id = resolution.round_id,
                    target_rotation = resolution.target_rotation,
                    "rolling"
                );
            }
            Event::Resolved(resolution) => {
                println!("{}", serde_json::to_string(&resolution)?);
                completed += 1;
                if completed >= args.rounds {
                    break;
                }
                // No ticks while the next round is opened and seeded.
                ticker.stop().await;
                mailbox
                    .next_round()
                    .await
                    .context("failed to open next round")?;
                seed_round(config, &args.bets, &mut mailbox).await?;
                ticker = Ticker::spawn(mailbox.clone(), config.tick_ms);
            }
            Event::Stalled { code, message } => {
                ticker.stop().await;
                return Err(anyhow!("round stalled ({code}): {message}"));
            }
        }
    }

    ticker.stop().await;
    drop(mailbox);
    let _ = actor_handle.await;
    Ok(())
}

async fn seed_round(config: &LiveWheelConfig, bets: &[f64], mailbox: &mut Mailbox) -> Result<()> {
    if config.demo_players {
        for (identity, stake) in DEMO_PLAYERS {
            mailbox
                .credit(identity, stake)
                .await
                .with_context(|| format!("failed to seed {identity}"))?;
        }
    }
    for gross in bets {
        match mailbox.place_bet(&config.player, *gross).await {
            Ok(receipt) => info!(
                identity = %receipt.identity,
                net = receipt.net,
                fee = %format!("-{:.2} FEE", receipt.fee),
                "bet accepted"
            ),
            Err(err) => warn!(gross, %err, "bet rejected"),
        }
    }
    Ok(())
}
