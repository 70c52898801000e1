use serde::{Deserialize, Serialize};

/// A single held position, derived from the transaction log and a quote.
/// Never persisted — recomputed on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker symbol, uppercased
    pub ticker: String,

    /// Signed sum of all transaction quantities for this ticker.
    /// Always positive in engine output; non-positive positions are
    /// filtered out before they reach a summary.
    pub net_quantity: f64,

    /// Current mark price from the quote (0 when no quote was available)
    pub current_price: f64,

    /// 24h price movement in percent, from the quote
    pub change_percent_24h: f64,

    /// Mark-to-market value: `net_quantity * current_price`
    pub market_value: f64,

    /// This position's share of total portfolio value, in percent.
    /// Filled in by allocation; 0 until then, and 0 for every position
    /// when the whole portfolio is worth zero.
    pub percentage: f64,

    /// True when the underlying quote was a fallback, not a live value
    #[serde(default)]
    pub is_simulated: bool,
}

/// The published portfolio summary consumed by the presentation layer.
///
/// Derived and owned by the call that produced it; the engine keeps no
/// state between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of market value over all included positions
    pub total_value: f64,

    /// Day-over-day change of the whole portfolio, in percent.
    /// 0 when the previous-day value cannot be established.
    pub daily_change_percent: f64,

    /// Included positions, ordered by allocation (largest first,
    /// ties broken by ticker)
    pub positions: Vec<Position>,
}

impl PortfolioSummary {
    /// An empty summary: no positions, zero value, flat change.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_value: 0.0,
            daily_change_percent: 0.0,
            positions: Vec::new(),
        }
    }
}
