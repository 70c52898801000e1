use crate::models::quote::PriceQuote;

/// Static fallback price table for well-known tickers.
///
/// Used when every provider fails for a ticker: the dashboard keeps
/// rendering plausible numbers instead of going blank, and the quote is
/// flagged `is_simulated` so it is never mistaken for a live value.
const FALLBACK_PRICES: &[(&str, f64, f64)] = &[
    ("BTC", 104_645.0, 1.8),
    ("ETH", 2_532.0, 3.2),
    ("SOL", 172.0, 5.7),
    ("ADA", 0.7623, 2.1),
    ("XRP", 2.41, 1.5),
    ("DOT", 7.25, 2.3),
    ("DOGE", 0.12, 4.5),
    ("SHIB", 0.00002, 3.8),
    ("AVAX", 35.75, 6.2),
    ("MATIC", 0.85, 1.9),
    ("AAPL", 211.0, -0.09),
    ("MSFT", 454.0, 0.2),
    ("AMZN", 205.0, 0.2),
    ("GOOGL", 166.0, 1.3),
    ("TSLA", 349.0, 2.0),
    ("META", 640.0, -0.55),
    ("NVDA", 135.0, 0.42),
    ("JPM", 152.75, 0.3),
    ("V", 235.40, 0.7),
    ("WMT", 59.85, -0.2),
];

/// Build a simulated quote for a ticker.
///
/// Known tickers get a plausible price from the static table; unknown ones
/// degrade to price 0 / change 0, which values the position at zero without
/// ever raising an error.
#[must_use]
pub fn fallback_quote(ticker: &str) -> PriceQuote {
    let upper = ticker.to_uppercase();
    let (price, change) = FALLBACK_PRICES
        .iter()
        .find(|(t, _, _)| *t == upper)
        .map(|(_, p, c)| (*p, *c))
        .unwrap_or((0.0, 0.0));

    PriceQuote {
        ticker: upper,
        price,
        change_percent_24h: change,
        is_simulated: true,
    }
}
