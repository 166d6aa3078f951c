//! Weighted draw over stakes.
//!
//! A ticket is drawn uniformly from `[0, pot)` and mapped onto the participants'
//! cumulative stake intervals in insertion order. Each interval is closed-open, so every
//! unit of stake maps to exactly one participant and `P(i) = stake_i / pot`.

use spinpot_types::{Participant, WheelError};
use tracing::warn;

/// Winner of a draw and the stake interval that contained the ticket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Index into the insertion-ordered participants.
    pub index: usize,
    pub ticket: f64,
    pub lower: f64,
    pub upper: f64,
}

pub fn select_winner(
    participants: &[Participant],
    pot: f64,
    random_unit: f64,
) -> Result<Selection, WheelError> {
    if participants.is_empty() || pot.is_nan() || pot <= 0.0 {
        return Err(WheelError::EmptyPot);
    }
    if !(0.0..1.0).contains(&random_unit) {
        return Err(WheelError::InvalidRandomUnit { value: random_unit });
    }

    let ticket = random_unit * pot;
    let mut accumulated = 0.0;
    let mut last_staked = None;
    for (index, participant) in participants.iter().enumerate() {
        let lower = accumulated;
        let upper = accumulated + participant.stake;
        if participant.stake > 0.0 {
            if ticket >= lower && ticket < upper {
                return Ok(Selection {
                    index,
                    ticket,
                    lower,
                    upper,
                });
            }
            last_staked = Some((index, lower, upper));
        }
        accumulated = upper;
    }

    // Rounding can leave the ticket at or past the accumulated total.
    match last_staked {
        Some((index, lower, upper)) => {
            warn!(ticket, accumulated, pot, "ticket past final interval; assigning last");
            Ok(Selection {
                index,
                ticket,
                lower,
                upper,
            })
        }
        None => Err(WheelError::EmptyPot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn participants(stakes: &[(&str, f64)]) -> Vec<Participant> {
        stakes
            .iter()
            .map(|(identity, stake)| Participant {
                identity: identity.to_string(),
                stake: *stake,
                color: "#ffffff".to_string(),
            })
            .collect()
    }

    fn pot(participants: &[Participant]) -> f64 {
        participants.iter().map(|p| p.stake).sum()
    }

    #[test]
    fn test_reference_mapping() {
        let ps = participants(&[("A", 50.0), ("B", 25.5), ("C", 15.0), ("D", 5.0)]);
        let total = pot(&ps);
        assert_eq!(total, 95.5);

        let selection = select_winner(&ps, total, 0.3).unwrap();
        assert!((selection.ticket - 28.65).abs() < 1e-9);
        assert_eq!(ps[selection.index].identity, "A");
        assert_eq!((selection.lower, selection.upper), (0.0, 50.0));

        // B:[50,75.5) C:[75.5,90.5) D:[90.5,95.5)
        assert_eq!(select_winner(&ps, total, 50.0 / 95.5).unwrap().index, 1);
        assert_eq!(select_winner(&ps, total, 80.0 / 95.5).unwrap().index, 2);
        assert_eq!(select_winner(&ps, total, 91.0 / 95.5).unwrap().index, 3);
    }

    #[test]
    fn test_lower_bound_belongs_to_interval() {
        let ps = participants(&[("A", 1.0), ("B", 1.0), ("C", 2.0)]);
        // ticket = 0.25 * 4 = 1.0, exactly B's lower bound
        let selection = select_winner(&ps, 4.0, 0.25).unwrap();
        assert_eq!(selection.index, 1);
        // ticket = 0.5 * 4 = 2.0, exactly C's lower bound
        assert_eq!(select_winner(&ps, 4.0, 0.5).unwrap().index, 2);
    }

    #[test]
    fn test_boundaries() {
        let ps = participants(&[("A", 3.0), ("B", 2.0), ("C", 1.0)]);
        assert_eq!(select_winner(&ps, 6.0, 0.0).unwrap().index, 0);
        let almost_one = 1.0 - f64::EPSILON;
        assert_eq!(select_winner(&ps, 6.0, almost_one).unwrap().index, 2);
    }

    #[test]
    fn test_zero_stakes_never_win() {
        let ps = participants(&[("zero", 0.0), ("A", 1.0), ("tail", 0.0)]);
        assert_eq!(select_winner(&ps, 1.0, 0.0).unwrap().index, 1);
        assert_eq!(select_winner(&ps, 1.0, 0.999).unwrap().index, 1);
    }

    #[test]
    fn test_drift_falls_back_to_last_staked() {
        let ps = participants(&[("A", 1.0), ("B", 1.0), ("tail", 0.0)]);
        // A pot larger than the stakes sum pushes the ticket past every interval.
        let selection = select_winner(&ps, 2.5, 0.9).unwrap();
        assert_eq!(selection.index, 1);
    }

    #[test]
    fn test_empty_pot() {
        assert_eq!(select_winner(&[], 0.0, 0.5), Err(WheelError::EmptyPot));
        let zeros = participants(&[("A", 0.0), ("B", 0.0)]);
        assert_eq!(select_winner(&zeros, 0.0, 0.5), Err(WheelError::EmptyPot));
        let ps = participants(&[("A", 1.0)]);
        assert_eq!(select_winner(&ps, -1.0, 0.5), Err(WheelError::EmptyPot));
        assert_eq!(select_winner(&ps, f64::NAN, 0.5), Err(WheelError::EmptyPot));
    }

    #[test]
    fn test_rejects_random_unit_out_of_range() {
        let ps = participants(&[("A", 1.0)]);
        assert_eq!(
            select_winner(&ps, 1.0, 1.0),
            Err(WheelError::InvalidRandomUnit { value: 1.0 })
        );
        assert!(select_winner(&ps, 1.0, -0.1).is_err());
        assert!(select_winner(&ps, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_fairness_converges_to_stake_share() {
        let ps = participants(&[("A", 50.0), ("B", 25.0), ("C", 15.0), ("D", 10.0)]);
        let total = pot(&ps);
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 100_000;
        let mut counts = [0u32; 4];
        for _ in 0..trials {
            let selection = select_winner(&ps, total, rng.gen::<f64>()).unwrap();
            counts[selection.index] += 1;
        }
        let expected = [0.50, 0.25, 0.15, 0.10];
        for (count, share) in counts.iter().zip(expected) {
            let observed = *count as f64 / trials as f64;
            assert!(
                (observed - share).abs() < 0.01,
                "observed {observed}, expected {share}"
            );
        }
    }
}
