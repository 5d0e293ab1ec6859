//! Bollinger Bands: SMA envelope +/- 2 population standard deviations.

use crate::domain::ohlcv::OhlcvBar;

pub const STDDEV_MULT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn calculate(bars: &[OhlcvBar], period: usize) -> Vec<Option<Bands>> {
    let mut out = vec![None; bars.len()];
    if period == 0 {
        return out;
    }

    for i in (period - 1)..bars.len() {
        let window = &bars[i + 1 - period..=i];
        let middle = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|b| {
                let diff = b.close - middle;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();
        out[i] = Some(Bands {
            upper: middle + STDDEV_MULT * stddev,
            middle,
            lower: middle - STDDEV_MULT * stddev,
        });
    }

    out
}
