//! Moving Average Convergence Divergence.
//!
//! MACD line = EMA(fast) - EMA(slow); signal = EMA(signal) of the MACD line,
//! seeded with the SMA of its first `signal` defined values. The line is
//! defined from index slow-1, the signal from index slow-1 + signal-1.

use super::ema::ema_values;
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
}

pub fn calculate(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> Vec<Option<MacdPoint>> {
    let mut out = vec![None; bars.len()];
    if fast == 0 || slow == 0 || signal_span == 0 || bars.len() < slow {
        return out;
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema_fast = ema_values(&closes, fast);
    let ema_slow = ema_values(&closes, slow);

    let line_start = slow.max(fast) - 1;
    let line: Vec<f64> = (line_start..bars.len())
        .filter_map(|i| match (ema_fast[i], ema_slow[i]) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = ema_values(&line, signal_span);
    for (offset, sig) in signal.into_iter().enumerate() {
        if let Some(sig) = sig {
            out[line_start + offset] = Some(MacdPoint {
                line: line[offset],
                signal: sig,
            });
        }
    }

    out
}
