//! Price feed port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::ohlcv::{OhlcvBar, Timeframe};

/// Source of OHLCV history for one instrument.
///
/// Implementations return bars at the requested timeframe covering roughly
/// the trailing `period_days`. An empty vec is a valid answer meaning "no
/// data here" — the fallback feed treats it as a signal to synthesize.
pub trait PriceFeed {
    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        period_days: i64,
    ) -> Result<Vec<OhlcvBar>, AnalyzerError>;
}
