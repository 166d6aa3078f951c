//! Single-round table actor and its tick source.

mod actor;
mod ingress;

use std::time::Duration;

pub use actor::Actor;
pub use ingress::{Mailbox, Message, TableError};
use serde::Serialize;
use spinpot_execution::RoundConfig;
use spinpot_types::{DisplayState, Resolution, TickReport, WheelError};
use tokio::{task::JoinHandle, time};
use tracing::debug;

pub struct Config<P> {
    pub round: RoundConfig,
    pub activity: P,
    /// Seed for the draw.
    pub seed: u64,
    pub mailbox_size: usize,
}

/// What one tick did, as seen by the caller of [`Mailbox::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub report: TickReport,
    /// Set on the tick that locked the round and drew the winner.
    pub resolution: Option<Resolution>,
    /// Set when the draw at lock failed; the round stays locked.
    pub error: Option<WheelError>,
}

/// Pushed to observers as the round moves.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    State(DisplayState),
    Spinning(Resolution),
    Resolved(Resolution),
    Stalled { code: &'static str, message: String },
}

/// Tick source sending a tick through the mailbox every `tick_ms`.
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(mut mailbox: Mailbox, tick_ms: u64) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_millis(tick_ms));
            // The first tick of an interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !mailbox.send_tick().await {
                    break;
                }
            }
            debug!("ticker stopped");
        });
        Self { handle }
    }

    /// Stop ticking. Once this returns, every tick the ticker sent is queued ahead of
    /// any request made afterwards.
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}
