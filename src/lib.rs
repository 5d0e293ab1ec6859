//! sahamlab — IDX stock analysis toolkit: synthetic data, indicators,
//! backtesting, sizing, and recommendations.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
