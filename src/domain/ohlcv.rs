//! OHLCV bar representation, series validation, and resampling.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use std::str::FromStr;

use super::error::AnalyzerError;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// low <= open,close <= high, non-negative prices and volume.
    pub fn is_well_formed(&self) -> bool {
        self.low >= 0.0
            && self.volume >= 0
            && self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}

/// Bar resolution of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    M15,
    H1,
    D1,
    W1,
}

impl Timeframe {
    /// Start of the bucket containing `ts`. Weekly buckets start on Monday.
    pub fn bucket_start(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let midnight = ts.date().and_hms_opt(0, 0, 0).unwrap_or(ts);
        match self {
            Timeframe::M15 => {
                let minute = ts.minute() - ts.minute() % 15;
                midnight + Duration::hours(ts.hour() as i64) + Duration::minutes(minute as i64)
            }
            Timeframe::H1 => midnight + Duration::hours(ts.hour() as i64),
            Timeframe::D1 => midnight,
            Timeframe::W1 => {
                midnight - Duration::days(ts.weekday().num_days_from_monday() as i64)
            }
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    // The dashboard's "1m" selection maps to 15-minute buckets, matching the
    // coarsest resolution the feed actually serves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" | "15m" => Ok(Timeframe::M15),
            "1h" => Ok(Timeframe::H1),
            "1d" => Ok(Timeframe::D1),
            "1w" => Ok(Timeframe::W1),
            other => Err(format!(
                "unknown timeframe '{other}' (expected 1m, 1h, 1d, or 1w)"
            )),
        }
    }
}

/// Fail fast on malformed input before any numeric work happens.
///
/// Checks strictly increasing timestamps (duplicates disallowed) and the
/// per-bar shape invariant. Gaps are legal; illiquid periods may simply be
/// absent.
pub fn validate_series(bars: &[OhlcvBar]) -> Result<(), AnalyzerError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_well_formed() {
            return Err(AnalyzerError::InvalidSeries {
                reason: format!("bar {} at {} violates low <= open,close <= high", i, bar.ts),
            });
        }
        if i > 0 && bar.ts <= bars[i - 1].ts {
            return Err(AnalyzerError::InvalidSeries {
                reason: format!("non-increasing timestamp at bar {} ({})", i, bar.ts),
            });
        }
    }
    Ok(())
}

/// Downsample by taking the last bar of each bucket. Buckets without any
/// bars are dropped. Input must be in ascending timestamp order.
pub fn resample(bars: &[OhlcvBar], timeframe: Timeframe) -> Vec<OhlcvBar> {
    let mut out: Vec<OhlcvBar> = Vec::new();
    for bar in bars {
        let bucket = timeframe.bucket_start(bar.ts);
        if let Some(prev) = out.last_mut() {
            if timeframe.bucket_start(prev.ts) == bucket {
                *prev = bar.clone();
                continue;
            }
        }
        out.push(bar.clone());
    }
    out
}
