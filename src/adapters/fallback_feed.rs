//! Fallback feed decorator: bound the primary feed with a deadline and
//! recover to synthetic data on timeout, error, or an empty answer.
//!
//! The primary fetch runs on a worker thread; if the deadline passes the
//! thread is abandoned (abort-and-fall-back, no cancellation semantics) and
//! the synthetic feed answers instead. The outage is reported on stderr but
//! never surfaced as an error.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::domain::error::AnalyzerError;
use crate::domain::ohlcv::{OhlcvBar, Timeframe};
use crate::ports::data_port::PriceFeed;

use super::synthetic_feed::SyntheticFeed;

pub struct FallbackFeed {
    primary: Arc<dyn PriceFeed + Send + Sync>,
    timeout: Duration,
}

impl FallbackFeed {
    pub fn new(primary: Arc<dyn PriceFeed + Send + Sync>, timeout: Duration) -> Self {
        Self { primary, timeout }
    }
}

impl PriceFeed for FallbackFeed {
    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        period_days: i64,
    ) -> Result<Vec<OhlcvBar>, AnalyzerError> {
        let (tx, rx) = mpsc::channel();
        let primary = Arc::clone(&self.primary);
        let owned_symbol = symbol.to_string();
        thread::spawn(move || {
            let _ = tx.send(primary.fetch(&owned_symbol, timeframe, period_days));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(bars)) if !bars.is_empty() => Ok(bars),
            Ok(Ok(_)) => {
                eprintln!("feed returned no data for {symbol}, using synthetic series");
                SyntheticFeed.fetch(symbol, timeframe, period_days)
            }
            Ok(Err(err)) => {
                eprintln!("feed error for {symbol} ({err}), using synthetic series");
                SyntheticFeed.fetch(symbol, timeframe, period_days)
            }
            Err(_) => {
                eprintln!(
                    "feed timed out after {:?} for {symbol}, using synthetic series",
                    self.timeout
                );
                SyntheticFeed.fetch(symbol, timeframe, period_days)
            }
        }
    }
}
