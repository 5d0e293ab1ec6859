//! Single-position long-only backtest simulator.
//!
//! Replays an enriched series bar by bar through a two-state machine
//! (flat / long). The first bar only establishes the baseline; no trade is
//! evaluated on it.
//!
//! Entry (flat):  close > EMA and RSI > 50. Shares are sized from the cash
//! at risk divided by a per-share risk of max(2% of close, 1.0); a zero
//! share count leaves the machine flat.
//! Exit (long):   close < EMA or RSI < 45.
//! End of series: any open position is liquidated at the final close — an
//! unconditional close, not a strategy signal.

use super::indicator::IndicatorBar;
use super::position::{Position, TradeRecord};

/// Fraction of the entry price treated as risk per share when sizing.
const RISK_PER_SHARE_PCT: f64 = 0.02;
/// Reference constant pending a real reward-model implementation.
pub const REFERENCE_RISK_TO_REWARD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestMetrics {
    pub final_equity: f64,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    pub total_trades: usize,
    pub max_drawdown_pct: f64,
    pub risk_to_reward: f64,
}

impl BacktestMetrics {
    /// The flat field -> value mapping handed to export collaborators.
    /// Formatting is entirely their concern.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("final_equity", self.final_equity),
            ("win_rate_pct", self.win_rate_pct),
            ("profit_factor", self.profit_factor),
            ("total_trades", self.total_trades as f64),
            ("max_drawdown_pct", self.max_drawdown_pct),
            ("risk_to_reward", self.risk_to_reward),
        ]
    }

    fn empty(initial_capital: f64) -> Self {
        BacktestMetrics {
            final_equity: initial_capital,
            win_rate_pct: 0.0,
            profit_factor: 1.0,
            total_trades: 0,
            max_drawdown_pct: 0.0,
            risk_to_reward: REFERENCE_RISK_TO_REWARD,
        }
    }
}

/// Run the simulation and aggregate metrics from the resulting trades.
///
/// Never errors: an empty or single-bar series returns zeroed metrics with
/// the profit-factor sentinel 1.0 and equity equal to the initial capital.
pub fn run_backtest(
    series: &[IndicatorBar],
    initial_capital: f64,
    risk_pct: f64,
) -> BacktestMetrics {
    if series.len() < 2 {
        return BacktestMetrics::empty(initial_capital);
    }

    let mut cash = initial_capital;
    let mut position: Option<Position> = None;
    let mut trades: Vec<TradeRecord> = Vec::new();

    // Mark-to-market equity per bar, for drawdown tracking.
    let mut peak_equity = initial_capital;
    let mut max_drawdown = 0.0_f64;

    for row in &series[1..] {
        match position.take() {
            None => {
                if row.close > row.ema && row.rsi > 50.0 {
                    let risk_value = cash * (risk_pct / 100.0);
                    let risk_per_share = (row.close * RISK_PER_SHARE_PCT).max(1.0);
                    let shares = (risk_value / risk_per_share).floor() as i64;
                    if shares > 0 {
                        cash -= shares as f64 * row.close;
                        position = Some(Position {
                            shares,
                            entry_price: row.close,
                        });
                    }
                }
            }
            Some(pos) => {
                if row.close < row.ema || row.rsi < 45.0 {
                    cash += pos.market_value(row.close);
                    trades.push(TradeRecord {
                        entry_price: pos.entry_price,
                        exit_price: row.close,
                    });
                } else {
                    position = Some(pos);
                }
            }
        }

        let equity = cash
            + position
                .as_ref()
                .map_or(0.0, |pos| pos.market_value(row.close));
        if equity > peak_equity {
            peak_equity = equity;
        } else if peak_equity > 0.0 {
            let drawdown = (peak_equity - equity) / peak_equity;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    // Forced liquidation of any position still open at series end.
    if let Some(pos) = position {
        let last_close = series[series.len() - 1].close;
        cash += pos.market_value(last_close);
        trades.push(TradeRecord {
            entry_price: pos.entry_price,
            exit_price: last_close,
        });
    }

    aggregate(cash, &trades, max_drawdown)
}

fn aggregate(final_equity: f64, trades: &[TradeRecord], max_drawdown: f64) -> BacktestMetrics {
    let total_trades = trades.len();
    let wins = trades.iter().filter(|t| t.is_win()).count();

    let win_rate_pct = if total_trades > 0 {
        wins as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };

    let win_sum: f64 = trades
        .iter()
        .filter(|t| t.is_win())
        .map(TradeRecord::pnl_per_share)
        .sum();
    let loss_sum: f64 = trades
        .iter()
        .filter(|t| !t.is_win())
        .map(|t| t.pnl_per_share().abs())
        .sum();

    // Sentinel when no losses were observed: the gross win amount if there
    // were any wins, else 1.0.
    let profit_factor = if loss_sum > 0.0 {
        win_sum / loss_sum
    } else if win_sum > 0.0 {
        win_sum
    } else {
        1.0
    };

    BacktestMetrics {
        final_equity,
        win_rate_pct,
        profit_factor,
        total_trades,
        max_drawdown_pct: max_drawdown * 100.0,
        risk_to_reward: REFERENCE_RISK_TO_REWARD,
    }
}
