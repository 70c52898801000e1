use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default time-to-live for cached quotes (5 minutes).
const DEFAULT_TTL_SECS: i64 = 5 * 60;

/// A current price snapshot for one ticker.
///
/// `change_percent_24h` is expressed so that
/// `previous_price = price / (1 + change_percent_24h / 100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Ticker symbol, uppercased
    pub ticker: String,

    /// Current mark price (non-negative)
    pub price: f64,

    /// Signed price movement over the trailing 24 hours, in percent
    pub change_percent_24h: f64,

    /// True when this quote is a fallback value, not a live one.
    /// Propagated so callers can surface degraded data instead of
    /// silently treating it as live.
    #[serde(default)]
    pub is_simulated: bool,
}

impl PriceQuote {
    pub fn new(ticker: impl Into<String>, price: f64, change_percent_24h: f64) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            price,
            change_percent_24h,
            is_simulated: false,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedQuote {
    quote: PriceQuote,
    fetched_at: DateTime<Utc>,
}

/// Time-bounded cache of live quotes, keyed by ticker.
///
/// An explicit object with an injected clock: every operation takes `now`,
/// so staleness is testable without waiting out the TTL. Only live quotes
/// belong here — simulated fallbacks are never cached, so recovery from a
/// provider outage happens on the next refresh.
#[derive(Debug, Clone)]
pub struct QuoteCache {
    entries: HashMap<String, CachedQuote>,
    ttl: Duration,
}

impl QuoteCache {
    /// Create a cache with the default TTL (5 minutes).
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// Create a cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Get a cached quote if present and not expired at `now`.
    #[must_use]
    pub fn get(&self, ticker: &str, now: DateTime<Utc>) -> Option<&PriceQuote> {
        let key = ticker.to_uppercase();
        self.entries
            .get(&key)
            .filter(|c| now - c.fetched_at < self.ttl)
            .map(|c| &c.quote)
    }

    /// Insert or replace a quote, stamped with `now`.
    pub fn put(&mut self, quote: PriceQuote, now: DateTime<Utc>) {
        self.entries.insert(
            quote.ticker.clone(),
            CachedQuote {
                quote,
                fetched_at: now,
            },
        );
    }

    /// Whether a ticker has no usable entry at `now` (absent or stale).
    #[must_use]
    pub fn is_expired(&self, ticker: &str, now: DateTime<Utc>) -> bool {
        self.get(ticker, now).is_none()
    }

    /// Drop all entries that are stale at `now`.
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, c| now - c.fetched_at < ttl);
        before - self.entries.len()
    }

    /// Number of entries currently held, fresh or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all cached quotes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
