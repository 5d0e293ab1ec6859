//! Synthetic OHLCV generator, the offline fallback for the price feed.
//!
//! Close is a random walk (start 10000, steps N(0, 100), floored at 500);
//! open/high/low are the close perturbed by small normal noise with the
//! bar-shape invariant enforced by clamping. The RNG is seeded from a stable
//! hash of the symbol, so the same symbol always yields the same series.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;
use rand_distr::StandardNormal;

use super::ohlcv::OhlcvBar;
use super::seed::seeded_rng;

pub const BASE_PRICE: f64 = 10_000.0;
pub const STEP_STDDEV: f64 = 100.0;
pub const PRICE_FLOOR: f64 = 500.0;
pub const VOLUME_MIN: i64 = 100_000;
pub const VOLUME_MAX: i64 = 5_000_000;

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Generate one daily bar per business day in `[start, end]`.
///
/// Never errors: a range with no business days yields an empty series, which
/// the caller must treat as "no data".
pub fn generate(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<OhlcvBar> {
    let mut rng = seeded_rng(symbol);
    let mut bars = Vec::new();
    let mut level = BASE_PRICE;

    let mut date = start;
    while date <= end {
        if is_business_day(date) {
            let step: f64 = rng.sample::<f64, _>(StandardNormal) * STEP_STDDEV;
            level += step;
            let close = level.max(PRICE_FLOOR);

            let open = close * (1.0 + rng.sample::<f64, _>(StandardNormal) * 0.002);
            let high_raw = close * (1.0 + 0.005 + rng.sample::<f64, _>(StandardNormal) * 0.003);
            let low_raw = close * (1.0 - 0.005 + rng.sample::<f64, _>(StandardNormal) * 0.003);
            let high = high_raw.max(open).max(close);
            let low = low_raw.min(open).min(close);
            let volume = rng.gen_range(VOLUME_MIN..=VOLUME_MAX);

            if let Some(ts) = date.and_hms_opt(0, 0, 0) {
                bars.push(OhlcvBar {
                    ts,
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
        }
        date += Duration::days(1);
    }

    bars
}
