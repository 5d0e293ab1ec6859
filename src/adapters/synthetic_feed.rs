//! Price feed backed by the synthetic generator — the offline demo mode and
//! the recovery path of the fallback feed.

use chrono::{Duration, Utc};

use crate::domain::error::AnalyzerError;
use crate::domain::ohlcv::{resample, OhlcvBar, Timeframe};
use crate::domain::synthetic;
use crate::ports::data_port::PriceFeed;

#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticFeed;

impl PriceFeed for SyntheticFeed {
    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        period_days: i64,
    ) -> Result<Vec<OhlcvBar>, AnalyzerError> {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(period_days);
        let bars = synthetic::generate(symbol, start, end);
        Ok(resample(&bars, timeframe))
    }
}
