//! Report export port trait.

use crate::domain::backtest::BacktestMetrics;
use crate::domain::error::AnalyzerError;
use std::path::Path;

/// Port for exporting backtest results.
///
/// The core hands over only the flat metrics mapping
/// ([`BacktestMetrics::fields`]); layout and format belong to the adapter.
/// Export failure must never invalidate an analysis run — callers log the
/// error and carry on.
pub trait ReportPort {
    fn write(
        &self,
        symbol: &str,
        metrics: &BacktestMetrics,
        output_path: &Path,
    ) -> Result<(), AnalyzerError>;
}
