//! Domain error types.

/// Top-level error type for sahamlab.
///
/// Degenerate-but-valid inputs (zero trades, zero stop-loss distance, no
/// losing trades) are handled with sentinel values in the components
/// themselves and never reach this type. A feed outage is recovered inside
/// the fallback feed and is also not surfaced from the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("malformed price series: {reason}")]
    InvalidSeries { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient history for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("feed error for {symbol}: {reason}")]
    Feed { symbol: String, reason: String },

    #[error("export failed: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        let code: u8 = match err {
            AnalyzerError::Io(_) => 1,
            AnalyzerError::ConfigParse { .. }
            | AnalyzerError::ConfigMissing { .. }
            | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::InvalidSeries { .. } => 3,
            AnalyzerError::Feed { .. } => 4,
            AnalyzerError::NoData { .. } | AnalyzerError::InsufficientHistory { .. } => 5,
            AnalyzerError::Export { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
