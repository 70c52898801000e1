pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::collections::HashMap;

use chrono::Utc;
use models::portfolio::PortfolioSummary;
use models::quote::QuoteCache;
use models::transaction::{Transaction, TransactionDraft};
use providers::registry::QuoteProviderRegistry;
use services::quote_service::QuoteService;
use services::refresh_service::RefreshService;
use storage::traits::TransactionStore;

use errors::CoreError;

/// Main entry point for the Portfolio Tracker core library.
///
/// Owns the transaction store, the quote pipeline, and the last published
/// summary. The valuation engine underneath is pure; everything stateful
/// (store, cache, last summary) lives here.
#[must_use]
pub struct PortfolioTracker {
    store: Box<dyn TransactionStore>,
    quote_service: QuoteService,
    refresh_service: RefreshService,
    quote_cache: QuoteCache,
    last_summary: Option<PortfolioSummary>,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("cached_quotes", &self.quote_cache.len())
            .field("has_summary", &self.last_summary.is_some())
            .finish()
    }
}

impl PortfolioTracker {
    /// Create a tracker over a store and a provider registry.
    pub fn new(store: Box<dyn TransactionStore>, registry: QuoteProviderRegistry) -> Self {
        Self {
            store,
            quote_service: QuoteService::new(registry),
            refresh_service: RefreshService::new(),
            quote_cache: QuoteCache::new(),
            last_summary: None,
        }
    }

    /// Create a tracker with the default providers for the given API keys.
    /// Keys: "coinapi", "alphavantage".
    pub fn with_api_keys(
        store: Box<dyn TransactionStore>,
        api_keys: &HashMap<String, String>,
    ) -> Self {
        Self::new(store, QuoteProviderRegistry::new_with_defaults(api_keys))
    }

    /// Replace the quote cache, e.g. to change its TTL.
    pub fn set_quote_cache(&mut self, cache: QuoteCache) {
        self.quote_cache = cache;
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a buy (positive quantity) or sell (negative quantity).
    ///
    /// Validation happens at the store boundary: empty tickers, zero or
    /// non-finite quantities, and negative prices are rejected here and
    /// never reach the valuation engine.
    pub async fn add_transaction(
        &mut self,
        ticker: impl Into<String>,
        quantity: f64,
        price: f64,
    ) -> Result<Transaction, CoreError> {
        let draft = TransactionDraft::new(ticker, quantity, price);
        self.store.append(draft).await
    }

    /// Read the full transaction log in insertion order.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.store.list_all().await
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// Run one refresh cycle and publish the result as the last summary.
    ///
    /// On success the returned summary replaces the last published one.
    /// On failure (store unreachable) the last summary is preserved so the
    /// dashboard keeps rendering last-known data; the error is retryable.
    pub async fn refresh(&mut self) -> Result<PortfolioSummary, CoreError> {
        let summary = self
            .refresh_service
            .refresh(
                self.store.as_ref(),
                &self.quote_service,
                &mut self.quote_cache,
                Utc::now(),
            )
            .await?;
        self.last_summary = Some(summary.clone());
        Ok(summary)
    }

    /// The most recently published summary, if any refresh has succeeded.
    #[must_use]
    pub fn last_summary(&self) -> Option<&PortfolioSummary> {
        self.last_summary.as_ref()
    }

    // ── Cache Management ────────────────────────────────────────────

    /// Number of quotes currently cached.
    #[must_use]
    pub fn cached_quote_count(&self) -> usize {
        self.quote_cache.len()
    }

    /// Drop all cached quotes so the next refresh hits the providers.
    pub fn clear_quote_cache(&mut self) {
        self.quote_cache.clear();
    }
}
