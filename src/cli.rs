//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::csv_feed_adapter::CsvFeed;
use crate::adapters::csv_report_adapter::CsvReport;
use crate::adapters::csv_usage_log::CsvUsageLog;
use crate::adapters::fallback_feed::FallbackFeed;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::synthetic_feed::SyntheticFeed;
use crate::domain::backtest::run_backtest;
use crate::domain::error::AnalyzerError;
use crate::domain::fundamental::{fundamental_snapshot, sentiment_snapshot};
use crate::domain::indicator::{compute_indicators, IndicatorParams};
use crate::domain::ohlcv::{validate_series, Timeframe};
use crate::domain::recommendation::{
    RecommendationInputs, RecommendationProvider, ThresholdProvider,
};
use crate::domain::sizing::position_size;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceFeed;
use crate::ports::report_port::ReportPort;
use crate::ports::usage_port::{UsageEvent, UsageSink};

#[derive(Parser, Debug)]
#[command(name = "sahamlab", about = "IDX stock analysis toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full analysis pipeline for one stock
    Analyze {
        /// Stock code, e.g. BBCA
        #[arg(long)]
        code: String,
        #[arg(long)]
        sector: Option<String>,
        /// Bar resolution: 1m, 1h, 1d, or 1w
        #[arg(long)]
        timeframe: Option<String>,
        #[arg(long)]
        capital: Option<f64>,
        #[arg(long)]
        risk_pct: Option<f64>,
        #[arg(long)]
        stop_loss_pct: Option<f64>,
        #[arg(long)]
        period_days: Option<i64>,
        /// Display name recorded (anonymized) in the usage log
        #[arg(long)]
        user: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory of {CODE}.csv price files
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Write the backtest report to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        usage_log: Option<PathBuf>,
        /// Skip the CSV feed entirely and use synthetic data
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Dump the deterministic synthetic series for a stock as CSV
    Synth {
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "1d")]
        timeframe: String,
        #[arg(long, default_value_t = 365)]
        period_days: i64,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            code,
            sector,
            timeframe,
            capital,
            risk_pct,
            stop_loss_pct,
            period_days,
            user,
            config,
            data_dir,
            output,
            usage_log,
            offline,
            timeout_secs,
        } => run_analyze(AnalyzeArgs {
            code,
            sector,
            timeframe,
            capital,
            risk_pct,
            stop_loss_pct,
            period_days,
            user,
            config,
            data_dir,
            output,
            usage_log,
            offline,
            timeout_secs,
        }),
        Command::Synth {
            code,
            timeframe,
            period_days,
            output,
        } => run_synth(&code, &timeframe, period_days, output.as_deref()),
    }
}

pub struct AnalyzeArgs {
    pub code: String,
    pub sector: Option<String>,
    pub timeframe: Option<String>,
    pub capital: Option<f64>,
    pub risk_pct: Option<f64>,
    pub stop_loss_pct: Option<f64>,
    pub period_days: Option<i64>,
    pub user: Option<String>,
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub usage_log: Option<PathBuf>,
    pub offline: bool,
    pub timeout_secs: Option<u64>,
}

/// Fully-resolved analysis parameters: flag overrides config overrides default.
#[derive(Debug)]
pub struct AnalyzeParams {
    pub code: String,
    pub sector: String,
    pub timeframe: Timeframe,
    pub capital: f64,
    pub risk_pct: f64,
    pub stop_loss_pct: f64,
    pub period_days: i64,
    pub user: String,
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub usage_log: Option<PathBuf>,
    pub offline: bool,
    pub timeout_secs: u64,
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

pub fn resolve_params(
    args: AnalyzeArgs,
    config: &dyn ConfigPort,
) -> Result<AnalyzeParams, AnalyzerError> {
    let invalid = |key: &str, reason: &str| AnalyzerError::ConfigInvalid {
        section: "analysis".into(),
        key: key.into(),
        reason: reason.into(),
    };

    let timeframe_str = args
        .timeframe
        .or_else(|| config.get_string("analysis", "timeframe"))
        .unwrap_or_else(|| "1d".to_string());
    let timeframe: Timeframe = timeframe_str
        .parse()
        .map_err(|reason: String| invalid("timeframe", &reason))?;

    let capital = args
        .capital
        .unwrap_or_else(|| config.get_double("backtest", "initial_capital", 10_000_000.0));
    if capital <= 0.0 {
        return Err(invalid("initial_capital", "must be positive"));
    }

    let risk_pct = args
        .risk_pct
        .unwrap_or_else(|| config.get_double("backtest", "risk_pct", 1.0));
    if !(0.0..=100.0).contains(&risk_pct) || risk_pct == 0.0 {
        return Err(invalid("risk_pct", "must be in (0, 100]"));
    }

    let stop_loss_pct = args
        .stop_loss_pct
        .unwrap_or_else(|| config.get_double("backtest", "stop_loss_pct", 5.0));
    if stop_loss_pct < 0.0 {
        return Err(invalid("stop_loss_pct", "must be non-negative"));
    }

    let period_days = args
        .period_days
        .unwrap_or_else(|| config.get_int("analysis", "period_days", 365));
    if period_days <= 0 {
        return Err(invalid("period_days", "must be positive"));
    }

    let timeout_secs = match args.timeout_secs {
        Some(t) => t,
        None => {
            let t = config.get_int("feed", "timeout_secs", 3);
            if t < 0 {
                return Err(invalid("timeout_secs", "must be non-negative"));
            }
            t as u64
        }
    };

    Ok(AnalyzeParams {
        code: args.code.trim().to_uppercase(),
        sector: args
            .sector
            .or_else(|| config.get_string("analysis", "sector"))
            .unwrap_or_else(|| "Other".to_string()),
        timeframe,
        capital,
        risk_pct,
        stop_loss_pct,
        period_days,
        user: args
            .user
            .or_else(|| config.get_string("logging", "user"))
            .unwrap_or_default(),
        data_dir: args
            .data_dir
            .or_else(|| config.get_string("feed", "data_dir").map(PathBuf::from)),
        output: args.output,
        usage_log: args
            .usage_log
            .or_else(|| config.get_string("logging", "usage_log").map(PathBuf::from)),
        offline: args.offline || config.get_bool("feed", "offline", false),
        timeout_secs,
    })
}

fn build_feed(params: &AnalyzeParams) -> Box<dyn PriceFeed> {
    match (&params.data_dir, params.offline) {
        (Some(dir), false) => Box::new(FallbackFeed::new(
            Arc::new(CsvFeed::new(dir.clone())),
            Duration::from_secs(params.timeout_secs),
        )),
        _ => Box::new(SyntheticFeed),
    }
}

fn run_analyze(args: AnalyzeArgs) -> ExitCode {
    // Stage 1: Load config
    let adapter = match &args.config {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            }
        }
        None => FileConfigAdapter::empty(),
    };

    // Stage 2: Resolve and validate parameters
    let params = match resolve_params(args, &adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Fetch price series
    eprintln!(
        "Fetching {} days of bars for {}...",
        params.period_days, params.code
    );
    let feed = build_feed(&params);
    let bars = match feed.fetch(&params.code, params.timeframe, params.period_days) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if bars.is_empty() {
        let e = AnalyzerError::NoData {
            symbol: params.code.clone(),
        };
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_series(&bars) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 4: Indicators
    let indicator_params = IndicatorParams::default();
    eprintln!("Computing indicators over {} bars...", bars.len());
    let enriched = compute_indicators(&bars, &indicator_params);
    if enriched.is_empty() {
        let e = AnalyzerError::InsufficientHistory {
            symbol: params.code.clone(),
            bars: bars.len(),
            minimum: indicator_params.warmup() + 1,
        };
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 5: Backtest
    eprintln!("Running backtest over {} enriched bars...", enriched.len());
    let metrics = run_backtest(&enriched, params.capital, params.risk_pct);

    // Stage 6: Sizing, fundamentals, recommendation off the latest bar
    let last = &enriched[enriched.len() - 1];
    let size = position_size(
        last.close,
        params.capital,
        params.risk_pct,
        params.stop_loss_pct,
    );
    let fundamental = fundamental_snapshot(&params.code, &params.sector);
    let sentiment = sentiment_snapshot(&params.code);
    let recommendation = ThresholdProvider.recommend(&RecommendationInputs {
        pe: fundamental.pe,
        sector_pe_avg: fundamental.sector_pe_avg,
        rsi: last.rsi,
        sentiment_score: sentiment.sentiment_score,
    });

    // Stage 7: Summary on stdout
    println!("=== {} ({}) ===", params.code, params.sector);
    println!("Last close:       {:.2}", last.close);
    println!(
        "RSI / EMA:        {:.1} / {:.2}",
        last.rsi, last.ema
    );
    println!(
        "MACD / signal:    {:.2} / {:.2}",
        last.macd, last.macd_signal
    );
    println!("\n--- Backtest ---");
    println!("Final equity:     {:.0}", metrics.final_equity);
    println!("Win rate:         {:.1}%", metrics.win_rate_pct);
    println!("Profit factor:    {:.2}", metrics.profit_factor);
    println!("Total trades:     {}", metrics.total_trades);
    println!("Max drawdown:     {:.1}%", metrics.max_drawdown_pct);
    println!("\n--- Position sizing ---");
    println!("Shares:           {}", size.shares);
    println!("Risk amount:      {:.0}", size.risk_amount);
    println!("Stop-loss value:  {:.2}", size.stop_loss_value);
    println!("\n--- Fundamentals ---");
    println!(
        "P/E vs sector:    {:.2} vs {:.2}",
        fundamental.pe, fundamental.sector_pe_avg
    );
    println!("EPS / ROE / D-E:  {:.2} / {:.2} / {:.2}",
        fundamental.eps, fundamental.roe, fundamental.de_ratio
    );
    println!("Sentiment score:  {:.1}", sentiment.sentiment_score);
    println!(
        "\nRecommendation:   {} (confidence {:.2})",
        recommendation.action, recommendation.confidence
    );

    // Stage 8: Optional CSV export; failure is a warning, not a run failure
    if let Some(output) = &params.output {
        match CsvReport.write(&params.code, &metrics, output) {
            Ok(()) => eprintln!("Report written to {}", output.display()),
            Err(e) => eprintln!("warning: {e}"),
        }
    }

    // Stage 9: Optional usage event
    if let Some(log_path) = &params.usage_log {
        let event = UsageEvent::new("analysis_run", &params.user)
            .with_meta("stock", &params.code)
            .with_meta("action", recommendation.action)
            .with_meta("total_trades", metrics.total_trades);
        let sink = CsvUsageLog::new(log_path.clone());
        if let Err(e) = sink.record(&event) {
            eprintln!("warning: failed to record usage event: {e}");
        }
    }

    ExitCode::SUCCESS
}

fn run_synth(code: &str, timeframe: &str, period_days: i64, output: Option<&std::path::Path>) -> ExitCode {
    let timeframe: Timeframe = match timeframe.parse() {
        Ok(tf) => tf,
        Err(reason) => {
            let e = AnalyzerError::ConfigInvalid {
                section: "analysis".into(),
                key: "timeframe".into(),
                reason,
            };
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let code = code.trim().to_uppercase();
    let bars = match SyntheticFeed.fetch(&code, timeframe, period_days) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut out = String::from("ts,open,high,low,close,volume\n");
    for bar in &bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.ts.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }

    match output {
        Some(path) => match std::fs::write(path, out) {
            Ok(()) => {
                eprintln!("{} bars written to {}", bars.len(), path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to write {}: {}", path.display(), e);
                ExitCode::from(1)
            }
        },
        None => {
            print!("{out}");
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> AnalyzeArgs {
        AnalyzeArgs {
            code: "bbca".to_string(),
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

    #[test]
    fn defaults_when_no_flags_and_empty_config() {
        let params = resolve_params(base_args(), &FileConfigAdapter::empty()).unwrap();
        assert_eq!(params.code, "BBCA");
        assert_eq!(params.sector, "Other");
        assert_eq!(params.timeframe, Timeframe::D1);
        assert_eq!(params.capital, 10_000_000.0);
        assert_eq!(params.risk_pct, 1.0);
        assert_eq!(params.stop_loss_pct, 5.0);
        assert_eq!(params.period_days, 365);
        assert_eq!(params.timeout_secs, 3);
        assert!(params.data_dir.is_none());
        assert!(!params.offline);
    }

    #[test]
    fn flags_override_config() {
        let config = FileConfigAdapter::from_string(
            "[backtest]\ninitial_capital = 5000000\nrisk_pct = 2.0\n",
        )
        .unwrap();
        let args = AnalyzeArgs {
            capital: Some(20_000_000.0),
            ..base_args()
        };
        let params = resolve_params(args, &config).unwrap();
        assert_eq!(params.capital, 20_000_000.0);
        assert_eq!(params.risk_pct, 2.0);
    }

    #[test]
    fn config_supplies_feed_settings() {
        let config = FileConfigAdapter::from_string(
            "[feed]\ndata_dir = /data/prices\noffline = yes\ntimeout_secs = 10\n",
        )
        .unwrap();
        let params = resolve_params(base_args(), &config).unwrap();
        assert_eq!(params.data_dir, Some(PathBuf::from("/data/prices")));
        assert!(params.offline);
        assert_eq!(params.timeout_secs, 10);
    }

    #[test]
    fn invalid_timeframe_rejected() {
        let args = AnalyzeArgs {
            timeframe: Some("2d".to_string()),
            ..base_args()
        };
        let err = resolve_params(args, &FileConfigAdapter::empty()).unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigInvalid { .. }));
    }

    #[test]
    fn non_positive_capital_rejected() {
        let args = AnalyzeArgs {
            capital: Some(0.0),
            ..base_args()
        };
        assert!(resolve_params(args, &FileConfigAdapter::empty()).is_err());
    }

    #[test]
    fn out_of_range_risk_rejected() {
        for risk in [0.0, -1.0, 150.0] {
            let args = AnalyzeArgs {
                risk_pct: Some(risk),
                ..base_args()
            };
            assert!(resolve_params(args, &FileConfigAdapter::empty()).is_err());
        }
    }

    #[test]
    fn negative_stop_loss_rejected() {
        let args = AnalyzeArgs {
            stop_loss_pct: Some(-1.0),
            ..base_args()
        };
        assert!(resolve_params(args, &FileConfigAdapter::empty()).is_err());
    }

    #[test]
    fn non_positive_period_rejected() {
        let args = AnalyzeArgs {
            period_days: Some(0),
            ..base_args()
        };
        assert!(resolve_params(args, &FileConfigAdapter::empty()).is_err());
    }

    #[test]
    fn cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "sahamlab", "analyze", "--code", "BBCA", "--risk-pct", "2.0", "--offline",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze {
                code,
                risk_pct,
                offline,
                ..
            } => {
                assert_eq!(code, "BBCA");
                assert_eq!(risk_pct, Some(2.0));
                assert!(offline);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn cli_parses_synth_defaults() {
        let cli = Cli::try_parse_from(["sahamlab", "synth", "--code", "TLKM"]).unwrap();
        match cli.command {
            Command::Synth {
                code,
                timeframe,
                period_days,
                output,
            } => {
                assert_eq!(code, "TLKM");
                assert_eq!(timeframe, "1d");
                assert_eq!(period_days, 365);
                assert!(output.is_none());
            }
            _ => panic!("expected synth"),
        }
    }
}
