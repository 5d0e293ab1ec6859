//! Append-only usage log on local disk.
//!
//! One CSV row per event: timestamp_utc, event_type, user_id, and the event
//! metadata flattened into a `key=value;key=value` column. The file is ready
//! to be lifted into a warehouse later; nothing here reads it back.

use chrono::Utc;
use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::domain::error::AnalyzerError;
use crate::ports::usage_port::{UsageEvent, UsageSink};

pub struct CsvUsageLog {
    path: PathBuf,
}

impl CsvUsageLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl UsageSink for CsvUsageLog {
    fn record(&self, event: &UsageEvent) -> Result<(), AnalyzerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            wtr.write_record(["timestamp_utc", "event_type", "user_id", "meta"])
                .map_err(io_reason)?;
        }

        let meta = event
            .meta
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";");

        wtr.write_record([
            Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            event.event_type.clone(),
            event.user_id.clone(),
            meta,
        ])
        .map_err(io_reason)?;
        wtr.flush()?;
        Ok(())
    }
}

fn io_reason(e: csv::Error) -> AnalyzerError {
    AnalyzerError::Io(std::io::Error::other(e.to_string()))
}
