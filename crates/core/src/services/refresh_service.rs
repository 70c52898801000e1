use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::portfolio::PortfolioSummary;
use crate::models::quote::QuoteCache;
use crate::services::quote_service::QuoteService;
use crate::services::valuation_service::ValuationService;
use crate::storage::traits::TransactionStore;

/// Runs one refresh cycle: transactions → aggregation → quotes → summary.
///
/// The cycle reads the store once and feeds that single snapshot through
/// the whole pipeline, so the resulting summary always corresponds to one
/// consistent point-in-time read. Stateless and idempotent — concurrent or
/// repeated refreshes over the same data produce the same summary.
///
/// Quote failures degrade to simulated quotes inside the quote service and
/// never surface here. The only error a refresh can return is a store read
/// failure, which is retryable; callers keep their last published summary
/// in that case.
pub struct RefreshService {
    valuation: ValuationService,
}

impl RefreshService {
    pub fn new() -> Self {
        Self {
            valuation: ValuationService::new(),
        }
    }

    /// Execute one refresh cycle against the given collaborators.
    pub async fn refresh(
        &self,
        store: &dyn TransactionStore,
        quote_service: &QuoteService,
        cache: &mut QuoteCache,
        now: DateTime<Utc>,
    ) -> Result<PortfolioSummary, CoreError> {
        let transactions = store.list_all().await?;
        let net = self.valuation.aggregate(&transactions);

        // Quotes are requested for exactly the tickers still held; sold-out
        // and over-sold tickers never reach the providers.
        let held: Vec<String> = net
            .iter()
            .filter(|(_, qty)| *qty > 0.0)
            .map(|(ticker, _)| ticker.clone())
            .collect();

        let quotes = quote_service.get_quotes(cache, &held, now).await;

        let mut summary = self.valuation.value(&net, &quotes);
        summary.positions = self.valuation.allocate(std::mem::take(&mut summary.positions));
        Ok(summary)
    }
}

impl Default for RefreshService {
    fn default() -> Self {
        Self::new()
    }
}
