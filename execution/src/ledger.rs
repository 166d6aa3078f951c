//! Participants and their stakes for one round.

use std::collections::HashMap;

use spinpot_types::{Participant, ParticipantView, WheelError};

/// Display colors, assigned by insertion index and cycled.
pub const PALETTE: [&str; 7] = [
    "#ef4444", // red
    "#3b82f6", // blue
    "#f59e0b", // orange
    "#8b5cf6", // purple
    "#10b981", // green
    "#ec4899", // pink
    "#6366f1", // indigo
];

/// Insertion-ordered stake ledger.
///
/// Insertion order is the canonical order for both the draw and the slices; the
/// stake-descending feed is a view computed on demand.
#[derive(Clone, Debug, Default)]
pub struct StakeLedger {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `net_amount` to `identity`, creating the participant on first sight.
    ///
    /// Returns the identity's stake after the credit. A credit that would push the
    /// stake or the pot past `f64::MAX` is rejected and leaves the ledger unchanged.
    pub fn add_stake(&mut self, identity: &str, net_amount: f64) -> Result<f64, WheelError> {
        if !net_amount.is_finite() || net_amount < 0.0 {
            return Err(WheelError::InvalidAmount { amount: net_amount });
        }
        if !(self.total_pot() + net_amount).is_finite() {
            return Err(WheelError::InvalidAmount { amount: net_amount });
        }
        if let Some(&idx) = self.index.get(identity) {
            let participant = &mut self.participants[idx];
            let stake = participant.stake + net_amount;
            if !stake.is_finite() {
                return Err(WheelError::InvalidAmount { amount: net_amount });
            }
            participant.stake = stake;
            return Ok(stake);
        }
        let idx = self.participants.len();
        self.participants.push(Participant {
            identity: identity.to_string(),
            stake: net_amount,
            color: PALETTE[idx % PALETTE.len()].to_string(),
        });
        self.index.insert(identity.to_string(), idx);
        Ok(net_amount)
    }

    pub fn total_pot(&self) -> f64 {
        self.participants.iter().map(|p| p.stake).sum()
    }

    /// Stake share of `identity` in `[0, 1]`, or `None` if unknown or the pot is empty.
    pub fn win_probability(&self, identity: &str) -> Option<f64> {
        let pot = self.total_pot();
        if pot <= 0.0 {
            return None;
        }
        self.get(identity).map(|p| p.stake / pot)
    }

    pub fn get(&self, identity: &str) -> Option<&Participant> {
        self.index.get(identity).map(|&idx| &self.participants[idx])
    }

    /// Participants in insertion order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Stable sort by stake descending; ties keep insertion order.
    pub fn participants_by_stake_descending(&self) -> Vec<&Participant> {
        let mut sorted: Vec<&Participant> = self.participants.iter().collect();
        sorted.sort_by(|a, b| b.stake.total_cmp(&a.stake));
        sorted
    }

    /// Feed rows with share percentages, stake descending.
    pub fn feed(&self) -> Vec<ParticipantView> {
        let pot = self.total_pot();
        self.participants_by_stake_descending()
            .into_iter()
            .map(|p| ParticipantView {
                identity: p.identity.clone(),
                stake: p.stake,
                share_percent: if pot > 0.0 { p.stake / pot * 100.0 } else { 0.0 },
                color: p.color.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn clear(&mut self) {
        self.participants.clear();
        self.index.clear();
    }
}
