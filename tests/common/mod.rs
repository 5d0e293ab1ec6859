#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sahamlab::domain::error::AnalyzerError;
pub use sahamlab::domain::ohlcv::OhlcvBar;
use sahamlab::domain::ohlcv::Timeframe;
use sahamlab::ports::data_port::PriceFeed;
use std::collections::HashMap;

pub struct MockFeed {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl PriceFeed for MockFeed {
    fn fetch(
        &self,
        symbol: &str,
        _timeframe: Timeframe,
        _period_days: i64,
    ) -> Result<Vec<OhlcvBar>, AnalyzerError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AnalyzerError::Feed {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }
}

pub fn day(i: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days(i)
}

pub fn make_bar(i: i64, close: f64) -> OhlcvBar {
    OhlcvBar {
        ts: day(i),
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume: 100_000,
    }
}

pub fn make_series(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i as i64, c))
        .collect()
}

/// A flat base, a sustained climb, and a sharp collapse: long enough to clear
/// the indicator warm-up and shaped to force at least one entry and exit.
pub fn boom_bust_series() -> Vec<OhlcvBar> {
    let mut closes = Vec::new();
    for i in 0..40 {
        closes.push(1000.0 + (i % 3) as f64);
    }
    for i in 0..25 {
        closes.push(1005.0 + i as f64 * 15.0);
    }
    for i in 0..15 {
        closes.push(1380.0 - i as f64 * 40.0);
    }
    make_series(&closes)
}
