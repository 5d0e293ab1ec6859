//! Exponential Moving Average.
//!
//! alpha = 2/(span+1), seeded with the SMA of the first `span` values, then
//! EMA[i] = x[i]*alpha + EMA[i-1]*(1-alpha). First span-1 slots are None.

use crate::domain::ohlcv::OhlcvBar;

/// EMA over a raw value slice. Also used by MACD for its constituent EMAs.
pub fn ema_values(values: &[f64], span: usize) -> Vec<Option<f64>> {
    if span == 0 {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        if i < span - 1 {
            sum += value;
            out.push(None);
        } else if i == span - 1 {
            sum += value;
            ema = sum / span as f64;
            out.push(Some(ema));
        } else {
            ema = value * alpha + ema * (1.0 - alpha);
            out.push(Some(ema));
        }
    }

    out
}

pub fn calculate(bars: &[OhlcvBar], span: usize) -> Vec<Option<f64>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    ema_values(&closes, span)
}
