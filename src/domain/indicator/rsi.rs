//! Relative Strength Index over a simple rolling mean of gains and losses.
//!
//! avg_gain and avg_loss are plain rolling means of the positive/negative
//! close-to-close deltas over the trailing `period` deltas (not Wilder's
//! smoothing). RS = avg_gain / (avg_loss + eps), RSI = 100 - 100/(1+RS).
//! The epsilon keeps the all-gains case finite instead of special-casing it.
//!
//! One delta exists per bar after the first, so the earliest defined RSI sits
//! at bar index `period`.

use crate::domain::ohlcv::OhlcvBar;

const EPS: f64 = 1e-9;

pub fn calculate(bars: &[OhlcvBar], period: usize) -> Vec<Option<f64>> {
    if period == 0 || bars.len() < 2 {
        return vec![None; bars.len()];
    }

    let mut gains = Vec::with_capacity(bars.len() - 1);
    let mut losses = Vec::with_capacity(bars.len() - 1);
    for window in bars.windows(2) {
        let delta = window[1].close - window[0].close;
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let mut out = vec![None; bars.len()];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for i in 0..gains.len() {
        gain_sum += gains[i];
        loss_sum += losses[i];
        if i >= period {
            gain_sum -= gains[i - period];
            loss_sum -= losses[i - period];
        }
        if i + 1 >= period {
            let avg_gain = gain_sum / period as f64;
            let avg_loss = loss_sum / period as f64;
            let rs = avg_gain / (avg_loss + EPS);
            out[i + 1] = Some(100.0 - 100.0 / (1.0 + rs));
        }
    }

    out
}
