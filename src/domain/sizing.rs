//! Position-sizing calculator for the risk-management panel.

/// Recommended order size for a given risk budget and stop-loss distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSize {
    pub shares: u64,
    /// Money put at risk on the trade: capital * risk_pct / 100.
    pub risk_amount: f64,
    /// Per-share loss if the stop is hit: last_price * stop_loss_pct / 100.
    pub stop_loss_value: f64,
}

impl PositionSize {
    pub fn notional(&self, last_price: f64) -> f64 {
        self.shares as f64 * last_price
    }
}

/// Pure sizing rule: shares = floor(risk_amount / stop_loss_value).
///
/// A zero (or negative) stop-loss distance or risk budget sizes to zero
/// shares instead of dividing by zero.
pub fn position_size(
    last_price: f64,
    capital: f64,
    risk_pct: f64,
    stop_loss_pct: f64,
) -> PositionSize {
    let risk_amount = capital * (risk_pct / 100.0);
    let stop_loss_value = last_price * (stop_loss_pct / 100.0);

    let shares = if stop_loss_value > 0.0 && risk_amount > 0.0 {
        (risk_amount / stop_loss_value).floor() as u64
    } else {
        0
    };

    PositionSize {
        shares,
        risk_amount,
        stop_loss_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sizing() {
        // risk 100,000; stop value 2% of 5000 = 100 -> 1000 shares.
        let size = position_size(5000.0, 10_000_000.0, 1.0, 2.0);
        assert_eq!(size.shares, 1000);
        assert!((size.risk_amount - 100_000.0).abs() < f64::EPSILON);
        assert!((size.stop_loss_value - 100.0).abs() < f64::EPSILON);
        assert!((size.notional(5000.0) - 5_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_stop_loss_sizes_to_zero() {
        let size = position_size(5000.0, 10_000_000.0, 1.0, 0.0);
        assert_eq!(size.shares, 0);
    }

    #[test]
    fn zero_risk_sizes_to_zero() {
        let size = position_size(5000.0, 10_000_000.0, 0.0, 2.0);
        assert_eq!(size.shares, 0);
    }

    #[test]
    fn fractional_shares_round_down() {
        // risk 100,000 / stop 150 = 666.67 -> 666.
        let size = position_size(7500.0, 10_000_000.0, 1.0, 2.0);
        assert_eq!(size.shares, 666);
    }

    #[test]
    fn shares_nondecreasing_in_risk_pct() {
        let mut prev = 0u64;
        for step in 1..=40 {
            let risk_pct = step as f64 * 0.25;
            let size = position_size(5000.0, 10_000_000.0, risk_pct, 2.0);
            assert!(size.shares >= prev);
            prev = size.shares;
        }
    }
}
