use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

use crate::models::asset::AssetType;
use crate::models::quote::{PriceQuote, QuoteCache};
use crate::providers::registry::QuoteProviderRegistry;
use crate::providers::simulated;

/// Attempts per provider before moving on to the next one.
const FETCH_ATTEMPTS: u32 = 2;

/// Delay before retrying a failed provider call.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Fetches current quotes from API providers with caching and fallback.
///
/// The contract callers rely on: `get_quotes` returns an entry for **every**
/// requested ticker. Cache hits are served without touching the network;
/// misses are batched per asset type and fetched with bounded retry across
/// the registered providers; anything still unpriced degrades to a
/// simulated quote flagged `is_simulated`. Quote acquisition never errors —
/// a transient provider outage must not block the dashboard from rendering.
pub struct QuoteService {
    registry: QuoteProviderRegistry,
}

impl QuoteService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Check if at least one provider is available for a given asset type.
    #[must_use]
    pub fn has_provider_for(&self, asset_type: &AssetType) -> bool {
        self.registry.get_provider_for(asset_type).is_some()
    }

    /// Get the names of all providers available for a given asset type.
    #[must_use]
    pub fn get_provider_names(&self, asset_type: &AssetType) -> Vec<String> {
        self.registry
            .get_providers_for(asset_type)
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Get current quotes for a set of tickers.
    ///
    /// `now` is the clock used for cache staleness — injected so tests can
    /// expire entries without waiting out the TTL. Live quotes are cached;
    /// simulated fallbacks are not, so recovery from an outage is immediate
    /// on the next call.
    pub async fn get_quotes(
        &self,
        cache: &mut QuoteCache,
        tickers: &[String],
        now: DateTime<Utc>,
    ) -> HashMap<String, PriceQuote> {
        let mut quotes: HashMap<String, PriceQuote> = HashMap::new();
        let mut misses: HashMap<AssetType, Vec<String>> = HashMap::new();

        for ticker in tickers {
            let upper = ticker.to_uppercase();
            if quotes.contains_key(&upper) {
                continue; // deduplicate
            }
            if let Some(cached) = cache.get(&upper, now) {
                quotes.insert(upper, cached.clone());
            } else {
                misses
                    .entry(AssetType::classify(&upper))
                    .or_default()
                    .push(upper);
            }
        }

        for (asset_type, group) in misses {
            let fetched = self.fetch_group(&asset_type, &group).await;
            for quote in fetched.into_values() {
                cache.put(quote.clone(), now);
                quotes.insert(quote.ticker.clone(), quote);
            }

            // Guarantee an entry for every requested ticker: anything the
            // providers could not price gets a simulated fallback.
            for ticker in &group {
                if !quotes.contains_key(ticker) {
                    log::warn!("All quote sources failed for {ticker}; using simulated quote");
                    quotes.insert(ticker.clone(), simulated::fallback_quote(ticker));
                }
            }
        }

        quotes
    }

    /// Fetch one asset-type group from the registered providers.
    ///
    /// Tries each provider in registration order with bounded retry.
    /// Quotes with non-finite or negative prices are discarded so bad
    /// provider data can't poison the valuation.
    async fn fetch_group(
        &self,
        asset_type: &AssetType,
        tickers: &[String],
    ) -> HashMap<String, PriceQuote> {
        let providers = self.registry.get_providers_for(asset_type);
        if providers.is_empty() {
            log::debug!("No provider registered for asset type {asset_type}");
            return HashMap::new();
        }

        for provider in &providers {
            for attempt in 1..=FETCH_ATTEMPTS {
                match provider.fetch_quotes(tickers).await {
                    Ok(mut fetched) => {
                        fetched.retain(|ticker, quote| {
                            let valid = quote.price.is_finite()
                                && quote.price >= 0.0
                                && quote.change_percent_24h.is_finite();
                            if !valid {
                                log::warn!(
                                    "{} returned invalid quote for {ticker}: price {}, change {}",
                                    provider.name(),
                                    quote.price,
                                    quote.change_percent_24h
                                );
                            }
                            valid
                        });
                        return fetched;
                    }
                    Err(e) => {
                        log::warn!(
                            "{} fetch failed (attempt {attempt}/{FETCH_ATTEMPTS}): {e}",
                            provider.name()
                        );
                        if attempt < FETCH_ATTEMPTS {
                            tokio::time::sleep(RETRY_DELAY).await;
                        }
                    }
                }
            }
        }

        HashMap::new()
    }
}
