//! Anonymized usage-event sink port.

use crate::domain::error::AnalyzerError;
use crate::domain::seed::stable_hash;

/// One usage event. The user name is anonymized at construction, so no sink
/// ever sees the real identity.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageEvent {
    pub event_type: String,
    pub user_id: String,
    pub meta: Vec<(String, String)>,
}

impl UsageEvent {
    pub fn new(event_type: &str, user_name: &str) -> Self {
        let name = if user_name.is_empty() {
            "anonymous"
        } else {
            user_name
        };
        UsageEvent {
            event_type: event_type.to_string(),
            user_id: format!("{:016x}", stable_hash(name)),
            meta: Vec::new(),
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl ToString) -> Self {
        self.meta.push((key.to_string(), value.to_string()));
        self
    }
}

/// Append-only event sink. The core never touches storage directly; it only
/// hands events to whatever sink was injected.
pub trait UsageSink {
    fn record(&self, event: &UsageEvent) -> Result<(), AnalyzerError>;
}
