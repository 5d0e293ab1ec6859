//! CSV file price feed.
//!
//! Reads `{SYMBOL}.csv` under a base directory with columns
//! ts,open,high,low,close,volume. Timestamps accept either
//! `%Y-%m-%d %H:%M:%S` or a bare `%Y-%m-%d` (treated as midnight).

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use std::path::PathBuf;

use crate::domain::error::AnalyzerError;
use crate::domain::ohlcv::{resample, OhlcvBar, Timeframe};
use crate::ports::data_port::PriceFeed;

pub struct CsvFeed {
    base_path: PathBuf,
}

impl CsvFeed {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol.to_uppercase()))
    }

    fn parse_ts(value: &str) -> Result<NaiveDateTime, String> {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
            return Ok(ts);
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| e.to_string())
            .and_then(|d| d.and_hms_opt(0, 0, 0).ok_or_else(|| "bad date".to_string()))
    }

    fn field<'a>(
        record: &'a csv::StringRecord,
        idx: usize,
        name: &str,
        symbol: &str,
    ) -> Result<&'a str, AnalyzerError> {
        record.get(idx).ok_or_else(|| AnalyzerError::Feed {
            symbol: symbol.to_string(),
            reason: format!("missing {name} column"),
        })
    }

    fn parse_num<T: std::str::FromStr>(
        value: &str,
        name: &str,
        symbol: &str,
    ) -> Result<T, AnalyzerError>
    where
        T::Err: std::fmt::Display,
    {
        value.parse().map_err(|e| AnalyzerError::Feed {
            symbol: symbol.to_string(),
            reason: format!("invalid {name} value: {e}"),
        })
    }
}

impl PriceFeed for CsvFeed {
    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        period_days: i64,
    ) -> Result<Vec<OhlcvBar>, AnalyzerError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            // Missing file is "no data", not an error; the fallback feed
            // decides what to do about it.
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(|e| AnalyzerError::Feed {
            symbol: symbol.to_string(),
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let cutoff = (Utc::now().naive_utc() - Duration::days(period_days))
            .date()
            .and_hms_opt(0, 0, 0);

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| AnalyzerError::Feed {
                symbol: symbol.to_string(),
                reason: format!("CSV parse error: {e}"),
            })?;

            let ts_str = Self::field(&record, 0, "ts", symbol)?;
            let ts = Self::parse_ts(ts_str).map_err(|e| AnalyzerError::Feed {
                symbol: symbol.to_string(),
                reason: format!("invalid timestamp '{ts_str}': {e}"),
            })?;

            if let Some(cutoff) = cutoff {
                if ts < cutoff {
                    continue;
                }
            }

            let open = Self::parse_num(Self::field(&record, 1, "open", symbol)?, "open", symbol)?;
            let high = Self::parse_num(Self::field(&record, 2, "high", symbol)?, "high", symbol)?;
            let low = Self::parse_num(Self::field(&record, 3, "low", symbol)?, "low", symbol)?;
            let close =
                Self::parse_num(Self::field(&record, 4, "close", symbol)?, "close", symbol)?;
            let volume =
                Self::parse_num(Self::field(&record, 5, "volume", symbol)?, "volume", symbol)?;

            bars.push(OhlcvBar {
                ts,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.ts);
        Ok(resample(&bars, timeframe))
    }
}
