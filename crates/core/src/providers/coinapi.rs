use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::quote::PriceQuote;

const BASE_URL: &str = "https://rest.coinapi.io/v1";

/// CoinAPI provider for cryptocurrency quotes.
///
/// - **Requires**: API key (sent as the `X-CoinAPI-Key` header).
/// - **Batching**: one request covers any number of tickers via
///   `/assets?filter_asset_id=BTC,ETH,...`.
/// - **Data**: prices in USD plus a trailing-24h percentage change.
pub struct CoinApiProvider {
    client: Client,
    api_key: String,
}

impl CoinApiProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }
}

// ── CoinAPI response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct AssetEntry {
    asset_id: String,
    price_usd: Option<f64>,
    #[serde(rename = "volume_1day_percent_change")]
    change_percent_24h: Option<f64>,
}

#[async_trait]
impl QuoteProvider for CoinApiProvider {
    fn name(&self) -> &str {
        "CoinAPI"
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Crypto]
    }

    async fn fetch_quotes(
        &self,
        tickers: &[String],
    ) -> Result<HashMap<String, PriceQuote>, CoreError> {
        if tickers.is_empty() {
            return Ok(HashMap::new());
        }

        let filter = tickers
            .iter()
            .map(|t| t.to_uppercase())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{BASE_URL}/assets?filter_asset_id={filter}");

        let resp = self
            .client
            .get(&url)
            .header("X-CoinAPI-Key", &self.api_key)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "CoinAPI".into(),
                message: format!("Request failed with status {}", resp.status()),
            });
        }

        let entries: Vec<AssetEntry> = resp.json().await.map_err(|e| CoreError::Api {
            provider: "CoinAPI".into(),
            message: format!("Failed to parse assets response: {e}"),
        })?;

        let mut quotes = HashMap::new();
        for entry in entries {
            // Entries without a USD price are unpriceable; skip them and
            // let the quote service substitute a fallback.
            let Some(price) = entry.price_usd else {
                continue;
            };
            let ticker = entry.asset_id.to_uppercase();
            quotes.insert(
                ticker.clone(),
                PriceQuote::new(ticker, price, entry.change_percent_24h.unwrap_or(0.0)),
            );
        }

        Ok(quotes)
    }
}
