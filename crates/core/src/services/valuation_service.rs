use std::collections::HashMap;

use crate::models::portfolio::{PortfolioSummary, Position};
use crate::models::quote::PriceQuote;
use crate::models::transaction::Transaction;

/// The portfolio valuation engine.
///
/// Pure business logic — no I/O, no clocks, no shared state. Safe to call
/// from any number of concurrent callers, and calling it twice with the
/// same input produces the same output.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum transaction quantities per ticker.
    ///
    /// Returns `(ticker, net_quantity)` pairs in first-seen order, tickers
    /// uppercased. Sells are negative quantities, so the sum is the net
    /// position. As a mapping the result is order-independent; only the
    /// pair order follows the input. Empty input yields an empty result.
    #[must_use]
    pub fn aggregate(&self, transactions: &[Transaction]) -> Vec<(String, f64)> {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, f64> = HashMap::new();

        for tx in transactions {
            let ticker = tx.ticker.to_uppercase();
            if !totals.contains_key(&ticker) {
                order.push(ticker.clone());
            }
            *totals.entry(ticker).or_insert(0.0) += tx.quantity;
        }

        order
            .into_iter()
            .map(|ticker| {
                let net = totals[&ticker];
                (ticker, net)
            })
            .collect()
    }

    /// Mark the aggregated positions to market and compute the daily change.
    ///
    /// Positions with non-positive net quantity are excluded from the
    /// output and from both totals — a fully-sold ticker must not pollute
    /// the change calculation. An over-sold aggregate is logged as a
    /// bookkeeping anomaly, not raised. A missing quote degrades that
    /// position to zero value. The result never contains NaN or Infinity.
    #[must_use]
    pub fn value(
        &self,
        net_quantities: &[(String, f64)],
        quotes: &HashMap<String, PriceQuote>,
    ) -> PortfolioSummary {
        let mut positions = Vec::new();
        let mut total_value = 0.0;
        let mut total_previous_value = 0.0;

        for (ticker, qty) in net_quantities {
            if *qty <= 0.0 {
                if *qty < 0.0 {
                    log::warn!(
                        "Over-sold position for {ticker} (net {qty}); excluded from portfolio"
                    );
                }
                continue;
            }

            let (price, change, simulated) = match quotes.get(ticker) {
                Some(q) => (q.price, q.change_percent_24h, q.is_simulated),
                None => {
                    log::warn!("No quote for held ticker {ticker}; valuing at zero");
                    (0.0, 0.0, false)
                }
            };

            let market_value = qty * price;

            // Back-calculate yesterday's value from the 24h change. A change
            // of -100% (or below) makes the divisor non-positive, so the
            // position is treated as flat instead of dividing by zero.
            let divisor = 1.0 + change / 100.0;
            let previous_value = if divisor > 0.0 {
                market_value / divisor
            } else {
                market_value
            };

            total_value += market_value;
            total_previous_value += previous_value;

            positions.push(Position {
                ticker: ticker.clone(),
                net_quantity: *qty,
                current_price: price,
                change_percent_24h: change,
                market_value,
                percentage: 0.0,
                is_simulated: simulated,
            });
        }

        let daily_change_percent = if total_previous_value > 0.0 {
            (total_value - total_previous_value) / total_previous_value * 100.0
        } else {
            0.0
        };

        PortfolioSummary {
            total_value,
            daily_change_percent,
            positions,
        }
    }

    /// Fill in each position's share of total portfolio value.
    ///
    /// When the whole set is worth zero (e.g., every quote missing), each
    /// percentage is 0 rather than NaN so the output stays well-formed.
    /// Output is ordered by percentage descending, ties broken by ticker.
    #[must_use]
    pub fn allocate(&self, mut positions: Vec<Position>) -> Vec<Position> {
        let total_value: f64 = positions.iter().map(|p| p.market_value).sum();

        for position in &mut positions {
            position.percentage = if total_value > 0.0 {
                position.market_value / total_value * 100.0
            } else {
                0.0
            };
        }

        positions.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        positions
    }

    /// Full pipeline: aggregate → value → allocate.
    #[must_use]
    pub fn summarize(
        &self,
        transactions: &[Transaction],
        quotes: &HashMap<String, PriceQuote>,
    ) -> PortfolioSummary {
        let net = self.aggregate(transactions);
        let mut summary = self.value(&net, quotes);
        summary.positions = self.allocate(std::mem::take(&mut summary.positions));
        summary
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
