use spinpot_execution::{FeedbackSink, RenderSink};
use spinpot_types::{BetReceipt, Resolution, Slice};
use tracing::{debug, info};

/// Stands in for the host haptic/notification channel by logging requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn bet_placed(&mut self, receipt: &BetReceipt) {
        info!(
            identity = %receipt.identity,
            net = receipt.net,
            fee = receipt.fee,
            impact = "medium",
            "haptic feedback"
        );
    }

    fn round_resolved(&mut self, resolution: &Resolution) {
        info!(
            round_id = resolution.round_id,
            winner = %resolution.winner,
            prize = resolution.prize,
            "winner notification"
        );
    }
}

/// Logs what a renderer would draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingRender;

impl RenderSink for TracingRender {
    fn slices_changed(&mut self, slices: &[Slice], pot: f64) {
        debug!(slices = slices.len(), pot, "wheel redrawn");
    }

    fn spin(&mut self, target_rotation: f64, spin_ticks: u32) {
        debug!(target_rotation, spin_ticks, "wheel spin");
    }
}
