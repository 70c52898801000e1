use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::quote::PriceQuote;

/// Trait abstraction for all quote providers.
///
/// Each market-data API (CoinAPI, Alpha Vantage) implements this trait.
/// If an API stops working or changes, only that one implementation is
/// replaced — the rest of the codebase is untouched.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which asset types this provider can handle.
    fn supported_asset_types(&self) -> Vec<AssetType>;

    /// Fetch current quotes for a batch of tickers.
    ///
    /// Providers batch into a single request where their API allows it and
    /// serialize per-ticker requests where it does not. A ticker the
    /// provider cannot price may be absent from the result; the quote
    /// service substitutes a fallback for it. A returned `Err` means the
    /// provider failed as a whole (network, auth, rate limit).
    async fn fetch_quotes(
        &self,
        tickers: &[String],
    ) -> Result<HashMap<String, PriceQuote>, CoreError>;
}
