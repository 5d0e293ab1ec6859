//! Dummy fundamental and sentiment generators for the offline demo.
//!
//! No real filings or news feeds are wired in; values are drawn around
//! sector-typical levels from an RNG seeded by the symbol, so every run
//! shows the same numbers for the same stock.

use rand::Rng;
use rand_distr::StandardNormal;

use super::seed::seeded_rng;

/// Sector-average P/E table for the IDX board.
const SECTOR_PE: &[(&str, f64)] = &[
    ("Banking", 15.4),
    ("Telecommunications", 18.2),
    ("Consumer", 20.1),
    ("Energy", 9.5),
    ("Mining", 11.2),
    ("Technology", 25.0),
];

const DEFAULT_SECTOR_PE: f64 = 15.0;

pub fn sector_pe_avg(sector: &str) -> f64 {
    SECTOR_PE
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, pe)| *pe)
        .unwrap_or(DEFAULT_SECTOR_PE)
}

/// Field names are a stable contract with the report/UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalSnapshot {
    pub pe: f64,
    pub sector_pe_avg: f64,
    pub eps: f64,
    pub roe: f64,
    pub de_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSnapshot {
    pub positive_news: f64,
    pub social_hype: f64,
    pub sentiment_score: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn fundamental_snapshot(symbol: &str, sector: &str) -> FundamentalSnapshot {
    let base_pe = sector_pe_avg(sector);
    let mut rng = seeded_rng(symbol);
    let pe = base_pe + rng.sample::<f64, _>(StandardNormal) * 2.0;
    let eps = 400.0 + rng.sample::<f64, _>(StandardNormal) * 50.0;
    let roe = 18.0 + rng.sample::<f64, _>(StandardNormal) * 4.0;
    let de_ratio = (0.6 + rng.sample::<f64, _>(StandardNormal) * 0.2).abs();

    FundamentalSnapshot {
        pe: round2(pe),
        sector_pe_avg: base_pe,
        eps: round2(eps),
        roe: round2(roe),
        de_ratio: round2(de_ratio),
    }
}

pub fn sentiment_snapshot(symbol: &str) -> SentimentSnapshot {
    // Salted so the sentiment stream is independent of the price walk.
    let mut rng = seeded_rng(&format!("{symbol}s"));
    let positive: f64 = rng.gen();
    let hype: f64 = rng.gen();

    SentimentSnapshot {
        positive_news: round1(positive * 100.0),
        social_hype: round1(hype * 100.0),
        sentiment_score: round1((positive * 0.6 + hype * 0.4) * 100.0),
    }
}
