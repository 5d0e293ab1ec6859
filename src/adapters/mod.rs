//! Adapters: concrete implementations of the port traits.

pub mod csv_feed_adapter;
pub mod csv_report_adapter;
pub mod csv_usage_log;
pub mod fallback_feed;
pub mod file_config_adapter;
pub mod synthetic_feed;
