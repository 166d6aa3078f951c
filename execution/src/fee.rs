//! Commission taken from every bet before it reaches the ledger.

use spinpot_types::WheelError;

/// Default house commission (5%).
pub const DEFAULT_COMMISSION_RATE: f64 = 0.05;

/// Gross bet split into the stake that enters the pot and the commission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeSplit {
    pub net: f64,
    pub fee: f64,
}

/// Check that a commission rate lies in `[0, 1)`.
pub fn validate_rate(rate: f64) -> Result<(), WheelError> {
    if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
        return Err(WheelError::InvalidFeeRate { rate });
    }
    Ok(())
}

/// Deduct `rate` from `gross`.
///
/// The net is derived by subtraction so that `net + fee` reproduces `gross`.
pub fn apply_fee(gross: f64, rate: f64) -> Result<FeeSplit, WheelError> {
    if !gross.is_finite() || gross <= 0.0 {
        return Err(WheelError::InvalidAmount { amount: gross });
    }
    validate_rate(rate)?;
    let fee = gross * rate;
    Ok(FeeSplit {
        net: gross - fee,
        fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use spinpot_types::AMOUNT_TOLERANCE;

    #[test]
    fn test_default_commission() {
        let split = apply_fee(10.0, DEFAULT_COMMISSION_RATE).unwrap();
        assert!((split.fee - 0.5).abs() < AMOUNT_TOLERANCE);
        assert!((split.net - 9.5).abs() < AMOUNT_TOLERANCE);
    }

    #[test]
    fn test_zero_rate_passes_everything_through() {
        let split = apply_fee(3.25, 0.0).unwrap();
        assert_eq!(split.fee, 0.0);
        assert_eq!(split.net, 3.25);
    }

    #[test]
    fn test_rejects_non_positive_gross() {
        assert_eq!(
            apply_fee(0.0, 0.05),
            Err(WheelError::InvalidAmount { amount: 0.0 })
        );
        assert_eq!(
            apply_fee(-1.0, 0.05),
            Err(WheelError::InvalidAmount { amount: -1.0 })
        );
        assert!(matches!(
            apply_fee(f64::NAN, 0.05),
            Err(WheelError::InvalidAmount { .. })
        ));
        assert!(matches!(
            apply_fee(f64::INFINITY, 0.05),
            Err(WheelError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_rejects_rate_out_of_range() {
        assert_eq!(
            apply_fee(1.0, 1.0),
            Err(WheelError::InvalidFeeRate { rate: 1.0 })
        );
        assert_eq!(
            apply_fee(1.0, -0.01),
            Err(WheelError::InvalidFeeRate { rate: -0.01 })
        );
    }

    proptest! {
        #[test]
        fn prop_net_plus_fee_is_gross(gross in 0.01f64..1_000_000.0, rate in 0.0f64..0.99) {
            let split = apply_fee(gross, rate).unwrap();
            prop_assert!((split.net + split.fee - gross).abs() < AMOUNT_TOLERANCE * gross.max(1.0));
            prop_assert_eq!(split.fee, gross * rate);
            prop_assert!(split.net > 0.0);
        }
    }
}
