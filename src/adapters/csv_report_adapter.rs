//! CSV backtest-report writer: one header row of metric names, one row of
//! values, straight from the flat metrics mapping.

use std::path::Path;

use crate::domain::backtest::BacktestMetrics;
use crate::domain::error::AnalyzerError;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReport;

impl CsvReport {
    /// Render the report as CSV text without touching the filesystem.
    pub fn render(&self, symbol: &str, metrics: &BacktestMetrics) -> Result<String, AnalyzerError> {
        let fields = metrics.fields();
        let mut wtr = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["symbol"];
        header.extend(fields.iter().map(|(name, _)| *name));
        wtr.write_record(&header).map_err(export_err)?;

        let mut row = vec![symbol.to_string()];
        row.extend(fields.iter().map(|(_, value)| value.to_string()));
        wtr.write_record(&row).map_err(export_err)?;

        let bytes = wtr.into_inner().map_err(|e| AnalyzerError::Export {
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| AnalyzerError::Export {
            reason: e.to_string(),
        })
    }
}

fn export_err(e: csv::Error) -> AnalyzerError {
    AnalyzerError::Export {
        reason: e.to_string(),
    }
}

impl ReportPort for CsvReport {
    fn write(
        &self,
        symbol: &str,
        metrics: &BacktestMetrics,
        output_path: &Path,
    ) -> Result<(), AnalyzerError> {
        let text = self.render(symbol, metrics)?;
        std::fs::write(output_path, text).map_err(|e| AnalyzerError::Export {
            reason: format!("writing {}: {}", output_path.display(), e),
        })
    }
}
