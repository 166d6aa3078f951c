//! Simulated competing bets for the demo feed.
//!
//! The round itself never generates bets. The table actor asks a policy once per open
//! tick and credits whatever it returns; a real deployment plugs in [`NoActivity`].

use rand::{rngs::StdRng, Rng, SeedableRng};
use spinpot_types::Participant;

/// A net stake to credit on behalf of another participant.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedBet {
    pub identity: String,
    pub amount: f64,
}

pub trait ActivityPolicy: Send {
    fn on_tick(&mut self, participants: &[Participant]) -> Option<SimulatedBet>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoActivity;

impl ActivityPolicy for NoActivity {
    fn on_tick(&mut self, _: &[Participant]) -> Option<SimulatedBet> {
        None
    }
}

/// With probability `probability` per tick, tops up a random existing participant by
/// `k + 0.5` for `k` uniform in `0..5`. The protected identity never receives bets.
pub struct RandomActivity {
    probability: f64,
    protected: String,
    rng: StdRng,
}

impl RandomActivity {
    /// `probability` must lie in `[0, 1]`.
    pub fn new(probability: f64, protected: impl Into<String>, seed: u64) -> Self {
        Self {
            probability,
            protected: protected.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActivityPolicy for RandomActivity {
    fn on_tick(&mut self, participants: &[Participant]) -> Option<SimulatedBet> {
        if !self.rng.gen_bool(self.probability) {
            return None;
        }
        let candidates: Vec<&Participant> = participants
            .iter()
            .filter(|p| p.identity != self.protected)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let pick = candidates[self.rng.gen_range(0..candidates.len())];
        let amount = f64::from(self.rng.gen_range(0u32..5)) + 0.5;
        Some(SimulatedBet {
            identity: pick.identity.clone(),
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants(names: &[&str]) -> Vec<Participant> {
        names
            .iter()
            .map(|name| Participant {
                identity: name.to_string(),
                stake: 1.0,
                color: "#ffffff".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_never_fires_at_zero_probability() {
        let mut policy = RandomActivity::new(0.0, "@you", 1);
        let ps = participants(&["@a", "@b"]);
        for _ in 0..1_000 {
            assert!(policy.on_tick(&ps).is_none());
        }
    }

    #[test]
    fn test_protected_identity_is_skipped_wherever_it_sits() {
        let mut policy = RandomActivity::new(1.0, "@you", 3);
        let ps = participants(&["@you", "@a", "@b"]);
        let mut seen_last = false;
        for _ in 0..500 {
            let bet = policy.on_tick(&ps).unwrap();
            assert_ne!(bet.identity, "@you");
            seen_last |= bet.identity == "@b";
            assert!([0.5, 1.5, 2.5, 3.5, 4.5].contains(&bet.amount));
        }
        // The last-indexed participant is eligible.
        assert!(seen_last);
    }

    #[test]
    fn test_only_protected_means_nothing() {
        let mut policy = RandomActivity::new(1.0, "@you", 3);
        assert!(policy.on_tick(&participants(&["@you"])).is_none());
        assert!(policy.on_tick(&[]).is_none());
    }

    #[test]
    fn test_rate_roughly_matches_probability() {
        let mut policy = RandomActivity::new(0.2, "@you", 9);
        let ps = participants(&["@a"]);
        let fired = (0..10_000).filter(|_| policy.on_tick(&ps).is_some()).count();
        assert!((1_700..2_300).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_no_activity() {
        assert!(NoActivity.on_tick(&participants(&["@a"])).is_none());
    }
}
