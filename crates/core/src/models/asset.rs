use serde::{Deserialize, Serialize};

/// Tickers recognized as cryptocurrencies. Anything else is routed to
/// the stock provider.
const KNOWN_CRYPTO: &[&str] = &[
    "BTC", "ETH", "SOL", "ADA", "XRP", "DOT", "DOGE", "SHIB", "AVAX", "MATIC",
];

/// The category of a tracked ticker.
/// Determines which quote provider to use for fetching market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Cryptocurrencies (BTC, ETH, etc.) — uses the CoinAPI provider
    Crypto,
    /// Stocks / equities (AAPL, MSFT, etc.) — uses the Alpha Vantage provider
    Stock,
}

impl AssetType {
    /// Classify a ticker symbol by its asset category.
    ///
    /// There is no exchange metadata in a bare ticker string, so
    /// classification is by a fixed list of known crypto symbols.
    #[must_use]
    pub fn classify(ticker: &str) -> Self {
        let upper = ticker.to_uppercase();
        if KNOWN_CRYPTO.contains(&upper.as_str()) {
            AssetType::Crypto
        } else {
            AssetType::Stock
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Crypto => write!(f, "Crypto"),
            AssetType::Stock => write!(f, "Stock"),
        }
    }
}
