//! Outbound collaborators of the round.
//!
//! Both sinks are fire-and-forget: the controller never consults a return value and a
//! sink must not call back into the round.

use spinpot_types::{BetReceipt, Resolution, Slice};

/// Host notification channel (haptics, push).
pub trait FeedbackSink: Send {
    /// A bet was accepted. Hosts with haptics play a medium impact.
    fn bet_placed(&mut self, receipt: &BetReceipt);

    fn round_resolved(&mut self, resolution: &Resolution);
}

/// Draws the wheel. The round makes no assumption about how.
pub trait RenderSink: Send {
    /// Slices changed (bet, activity, or new round).
    fn slices_changed(&mut self, slices: &[Slice], pot: f64);

    /// Animate from the current rotation to `target_rotation` over `spin_ticks` ticks.
    fn spin(&mut self, target_rotation: f64, spin_ticks: u32);
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl FeedbackSink for NoopSink {
    fn bet_placed(&mut self, _: &BetReceipt) {}

    fn round_resolved(&mut self, _: &Resolution) {}
}

impl RenderSink for NoopSink {
    fn slices_changed(&mut self, _: &[Slice], _: f64) {}

    fn spin(&mut self, _: f64, _: u32) {}
}
