//! Indicator engine: enrich a price series with RSI, EMA, Bollinger Bands,
//! and MACD columns, dropping rows that fall inside any warm-up window.
//!
//! Pure and deterministic: the same bars and parameters always produce
//! identical output.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

use super::ohlcv::OhlcvBar;
use chrono::NaiveDateTime;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub ema_period: usize,
    pub bb_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            rsi_period: 14,
            ema_period: 20,
            bb_period: 20,
        }
    }
}

impl IndicatorParams {
    /// Rows dropped from the front of the output. The MACD signal line is the
    /// longest chain with the defaults: (26-1) + (9-1) = 33 bars.
    pub fn warmup(&self) -> usize {
        self.rsi_period
            .max(self.ema_period.saturating_sub(1))
            .max(self.bb_period.saturating_sub(1))
            .max(MACD_SLOW + MACD_SIGNAL - 2)
    }
}

/// A price bar with every derived column defined.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBar {
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub rsi: f64,
    pub ema: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub macd: f64,
    pub macd_signal: f64,
}

/// Compute all indicator columns and keep only fully-defined rows.
///
/// Output length is `bars.len() - params.warmup()`; a series shorter than the
/// warm-up (or any zero period) yields an empty vec rather than an error —
/// callers must treat that as insufficient history and stop.
pub fn compute_indicators(bars: &[OhlcvBar], params: &IndicatorParams) -> Vec<IndicatorBar> {
    if params.rsi_period == 0 || params.ema_period == 0 || params.bb_period == 0 {
        return Vec::new();
    }

    let rsi = rsi::calculate(bars, params.rsi_period);
    let ema = ema::calculate(bars, params.ema_period);
    let bands = bollinger::calculate(bars, params.bb_period);
    let macd = macd::calculate(bars, MACD_FAST, MACD_SLOW, MACD_SIGNAL);

    let mut out = Vec::with_capacity(bars.len().saturating_sub(params.warmup()));
    for (i, bar) in bars.iter().enumerate() {
        if let (Some(rsi), Some(ema), Some(bands), Some(macd)) = (rsi[i], ema[i], bands[i], macd[i])
        {
            out.push(IndicatorBar {
                ts: bar.ts,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                rsi,
                ema,
                bb_upper: bands.upper,
                bb_middle: bands.middle,
                bb_lower: bands.lower,
                macd: macd.line,
                macd_signal: macd.signal,
            });
        }
    }

    out
}
