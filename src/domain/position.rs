//! Position and trade records for the single-position simulator.

/// Transient long position held during one backtest run.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub shares: i64,
    pub entry_price: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }
}

/// Immutable record of a closed round trip. Prices are per share.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub entry_price: f64,
    pub exit_price: f64,
}

impl TradeRecord {
    pub fn pnl_per_share(&self) -> f64 {
        self.exit_price - self.entry_price
    }

    /// Break-even exits count as losses.
    pub fn is_win(&self) -> bool {
        self.exit_price > self.entry_price
    }
}
