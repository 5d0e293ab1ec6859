//! Recommendation policy: fundamental + technical + sentiment signals in,
//! discrete action with a confidence score out.
//!
//! Providers are selected at construction time behind a trait so a
//! classifier-backed implementation can slot in later; the shipped provider
//! is the deterministic threshold rule.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Hold,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "Buy"),
            Action::Hold => write!(f, "Hold"),
            Action::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub action: Action,
    /// In [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationInputs {
    pub pe: f64,
    pub sector_pe_avg: f64,
    pub rsi: f64,
    pub sentiment_score: f64,
}

/// Any provider must map inputs to the same three-way action space and be
/// deterministic for a given input.
pub trait RecommendationProvider {
    fn recommend(&self, inputs: &RecommendationInputs) -> Recommendation;
}

/// Reference thresholding rule: undervalued P/E with a cool RSI is a buy,
/// an overbought RSI is a sell, anything else holds.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdProvider;

impl RecommendationProvider for ThresholdProvider {
    fn recommend(&self, inputs: &RecommendationInputs) -> Recommendation {
        if inputs.pe < inputs.sector_pe_avg && inputs.rsi < 50.0 {
            Recommendation {
                action: Action::Buy,
                confidence: 0.75,
            }
        } else if inputs.rsi > 70.0 {
            Recommendation {
                action: Action::Sell,
                confidence: 0.80,
            }
        } else {
            Recommendation {
                action: Action::Hold,
                confidence: 0.70,
            }
        }
    }
}
