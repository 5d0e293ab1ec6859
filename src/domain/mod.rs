//! Core domain types and logic.

pub mod backtest;
pub mod error;
pub mod fundamental;
pub mod indicator;
pub mod ohlcv;
pub mod position;
pub mod recommendation;
pub mod seed;
pub mod sizing;
pub mod synthetic;
