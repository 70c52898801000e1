use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::asset::AssetType;
use crate::models::quote::PriceQuote;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Delay between consecutive per-ticker requests. Alpha Vantage rate-limits
/// aggressively on the free tier, so batches are serialized.
const INTER_REQUEST_DELAY: Duration = Duration::from_millis(1000);

/// Alpha Vantage API provider for stock/equity quotes.
///
/// - **Free tier**: heavily rate limited (a handful of requests/minute).
/// - **Requires**: API key (set via the registry as "alphavantage").
/// - **No batch endpoint**: one `GLOBAL_QUOTE` request per ticker,
///   serialized with an inter-request delay.
///
/// The 24h change is derived from the quote itself:
/// `(price - previous_close) / previous_close * 100`, 0 when the previous
/// close is missing or zero.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }

    /// Fetch a single ticker's global quote.
    async fn fetch_one(&self, ticker: &str) -> Result<PriceQuote, CoreError> {
        let resp: GlobalQuoteResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", &ticker.to_uppercase()),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Alpha Vantage".into(),
                message: format!("Failed to parse quote for {ticker}: {e}"),
            })?;

        let quote = resp.global_quote.ok_or_else(|| CoreError::Api {
            provider: "Alpha Vantage".into(),
            message: format!("No quote data for {ticker}. API limit may be exceeded."),
        })?;

        let price: f64 = quote
            .price
            .as_deref()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| CoreError::Api {
                provider: "Alpha Vantage".into(),
                message: format!("Invalid price format for {ticker}"),
            })?;

        let previous_close: f64 = quote
            .previous_close
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0.0);

        let change_percent_24h = if previous_close > 0.0 {
            (price - previous_close) / previous_close * 100.0
        } else {
            0.0
        };

        Ok(PriceQuote::new(ticker, price, change_percent_24h))
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "Alpha Vantage"
    }

    fn supported_asset_types(&self) -> Vec<AssetType> {
        vec![AssetType::Stock]
    }

    async fn fetch_quotes(
        &self,
        tickers: &[String],
    ) -> Result<HashMap<String, PriceQuote>, CoreError> {
        let mut quotes = HashMap::new();

        for (i, ticker) in tickers.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(INTER_REQUEST_DELAY).await;
            }
            match self.fetch_one(ticker).await {
                Ok(quote) => {
                    quotes.insert(quote.ticker.clone(), quote);
                }
                Err(e) => {
                    // One unpriceable ticker must not abort the batch; the
                    // quote service substitutes a fallback for it.
                    log::warn!("Alpha Vantage quote for {ticker} failed: {e}");
                }
            }
        }

        Ok(quotes)
    }
}
