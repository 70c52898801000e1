use std::collections::HashMap;

use crate::models::asset::AssetType;

use super::alphavantage::AlphaVantageProvider;
use super::coinapi::CoinApiProvider;
use super::traits::QuoteProvider;

/// Registry of all available quote providers.
///
/// Routes requests to the correct provider based on `AssetType`.
/// New providers can be added without modifying existing code.
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers whose API keys are
    /// configured. Keys: "coinapi", "alphavantage".
    #[must_use]
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // CoinAPI — crypto, batched requests
        if let Some(key) = api_keys.get("coinapi") {
            registry.register(Box::new(CoinApiProvider::new(key.clone())));
        }

        // Alpha Vantage — stocks, serialized per-ticker requests
        if let Some(key) = api_keys.get("alphavantage") {
            registry.register(Box::new(AlphaVantageProvider::new(key.clone())));
        }

        registry
    }

    /// Register a new quote provider.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider that supports the given asset type.
    #[must_use]
    pub fn get_provider_for(&self, asset_type: &AssetType) -> Option<&dyn QuoteProvider> {
        self.providers
            .iter()
            .find(|p| p.supported_asset_types().contains(asset_type))
            .map(|p| p.as_ref())
    }

    /// Return ALL providers that support the given asset type, ordered by
    /// registration priority. Used for fallback: if the first provider
    /// fails, try the next one.
    #[must_use]
    pub fn get_providers_for(&self, asset_type: &AssetType) -> Vec<&dyn QuoteProvider> {
        self.providers
            .iter()
            .filter(|p| p.supported_asset_types().contains(asset_type))
            .map(|p| p.as_ref())
            .collect()
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
