//! CLI orchestration tests: parameter resolution against real INI files on
//! disk and end-to-end subcommand runs driven through `cli::run`.

use clap::Parser;
use sahamlab::adapters::file_config_adapter::FileConfigAdapter;
use sahamlab::cli::{self, AnalyzeArgs, Cli};
use sahamlab::domain::error::AnalyzerError;
use sahamlab::domain::ohlcv::Timeframe;
use std::io::Write;
use std::path::PathBuf;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[feed]
data_dir = /var/lib/sahamlab/prices
timeout_secs = 5
offline = false

[backtest]
initial_capital = 50000000.0
risk_pct = 2.0
stop_loss_pct = 4.0

[analysis]
timeframe = 1w
period_days = 730
sector = Banking

[logging]
user = Ary
usage_log = /tmp/sahamlab-usage.csv
"#;

fn bare_args(code: &str) -> AnalyzeArgs {
    AnalyzeArgs {
        code: code.to_string(),
        sector: None,
        timeframe: None,
        capital: None,
        risk_pct: None,
        stop_loss_pct: None,
        period_days: None,
        user: None,
        config: None,
        data_dir: None,
        output: None,
        usage_log: None,
        offline: false,
        timeout_secs: None,
    }
}

mod config_resolution {
    use super::*;

    #[test]
    fn config_file_supplies_every_parameter() {
        let file = write_temp_ini(VALID_INI);
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        let params = cli::resolve_params(bare_args("bbca"), &config).unwrap();

        assert_eq!(params.code, "BBCA");
        assert_eq!(params.sector, "Banking");
        assert_eq!(params.timeframe, Timeframe::W1);
        assert_eq!(params.capital, 50_000_000.0);
        assert_eq!(params.risk_pct, 2.0);
        assert_eq!(params.stop_loss_pct, 4.0);
        assert_eq!(params.period_days, 730);
        assert_eq!(params.user, "Ary");
        assert_eq!(
            params.data_dir,
            Some(PathBuf::from("/var/lib/sahamlab/prices"))
        );
        assert_eq!(
            params.usage_log,
            Some(PathBuf::from("/tmp/sahamlab-usage.csv"))
        );
        assert_eq!(params.timeout_secs, 5);
        assert!(!params.offline);
    }

    #[test]
    fn flags_beat_config_values() {
        let file = write_temp_ini(VALID_INI);
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        let args = AnalyzeArgs {
            capital: Some(1_000_000.0),
            timeframe: Some("1d".to_string()),
            sector: Some("Energy".to_string()),
            ..bare_args("tlkm")
        };
        let params = cli::resolve_params(args, &config).unwrap();

        assert_eq!(params.capital, 1_000_000.0);
        assert_eq!(params.timeframe, Timeframe::D1);
        assert_eq!(params.sector, "Energy");
        // Untouched keys still come from the file.
        assert_eq!(params.risk_pct, 2.0);
    }

    #[test]
    fn bad_config_value_is_rejected_with_section_and_key() {
        let file = write_temp_ini("[backtest]\nrisk_pct = 500\n");
        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        let err = cli::resolve_params(bare_args("bbca"), &config).unwrap_err();
        match err {
            AnalyzerError::ConfigInvalid { key, .. } => assert_eq!(key, "risk_pct"),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_fails_to_load() {
        let result = cli::load_config(&PathBuf::from("/nonexistent/sahamlab.ini"));
        assert!(result.is_err());
    }
}

mod end_to_end {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn offline_analyze_writes_report_and_usage_log() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("report.csv");
        let usage = dir.path().join("usage.csv");

        let cli = Cli::try_parse_from([
            "sahamlab",
            "analyze",
            "--code",
            "BBCA",
            "--offline",
            "--user",
            "Ary",
            "--output",
            report.to_str().unwrap(),
            "--usage-log",
            usage.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        let report_text = std::fs::read_to_string(&report).unwrap();
        assert!(report_text.contains("BBCA"));
        assert!(report_text.contains("win_rate_pct"));

        let usage_text = std::fs::read_to_string(&usage).unwrap();
        assert!(usage_text.contains("analysis_run"));
        assert!(usage_text.contains("stock=BBCA"));
        assert!(!usage_text.contains("Ary"));
    }

    #[test]
    fn analyze_reads_prices_from_data_dir() {
        let dir = TempDir::new().unwrap();
        // Business-day closes on a steady climb, enough to clear warm-up.
        let mut rows = String::from("ts,open,high,low,close,volume\n");
        use chrono::Datelike;
        let start = chrono::NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
        let mut d = start;
        let mut i = 0;
        while i < 80 {
            if d.weekday().num_days_from_monday() < 5 {
                let close = 1000.0 + i as f64 * 5.0;
                rows.push_str(&format!(
                    "{},{},{},{},{},100000\n",
                    d.format("%Y-%m-%d"),
                    close - 2.0,
                    close + 3.0,
                    close - 3.0,
                    close
                ));
                i += 1;
            }
            d += chrono::Duration::days(1);
        }
        std::fs::write(dir.path().join("BBCA.csv"), rows).unwrap();

        let report = dir.path().join("report.csv");
        let cli = Cli::try_parse_from([
            "sahamlab",
            "analyze",
            "--code",
            "BBCA",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--period-days",
            "36500",
            "--output",
            report.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        assert!(report.exists());
    }

    #[test]
    fn synth_dumps_a_csv_fixture() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("BBCA.csv");
        let cli = Cli::try_parse_from([
            "sahamlab",
            "synth",
            "--code",
            "BBCA",
            "--period-days",
            "365",
            "--output",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines[0], "ts,open,high,low,close,volume");
        // Roughly one bar per business day over a year.
        assert!(lines.len() > 200);
    }

    #[test]
    fn synth_output_feeds_back_into_the_csv_feed() {
        use sahamlab::adapters::csv_feed_adapter::CsvFeed;
        use sahamlab::ports::data_port::PriceFeed;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TLKM.csv");
        let cli = Cli::try_parse_from([
            "sahamlab",
            "synth",
            "--code",
            "TLKM",
            "--output",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        let feed = CsvFeed::new(dir.path().to_path_buf());
        let bars = feed.fetch("TLKM", Timeframe::D1, 365).unwrap();
        assert!(!bars.is_empty());
    }
}
