// ═══════════════════════════════════════════════════════════════════
// Model tests — AssetType, TransactionDraft, PriceQuote, QuoteCache,
// summary shape
// ═══════════════════════════════════════════════════════════════════

use chrono::{Duration, TimeZone, Utc};

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::asset::AssetType;
use portfolio_tracker_core::models::portfolio::{PortfolioSummary, Position};
use portfolio_tracker_core::models::quote::{PriceQuote, QuoteCache};
use portfolio_tracker_core::models::transaction::TransactionDraft;
use portfolio_tracker_core::providers::simulated;

// ═══════════════════════════════════════════════════════════════════
//  AssetType
// ═══════════════════════════════════════════════════════════════════

mod asset_type {
    use super::*;

    #[test]
    fn classifies_known_crypto() {
        assert_eq!(AssetType::classify("BTC"), AssetType::Crypto);
        assert_eq!(AssetType::classify("ETH"), AssetType::Crypto);
        assert_eq!(AssetType::classify("DOGE"), AssetType::Crypto);
    }

    #[test]
    fn classifies_everything_else_as_stock() {
        assert_eq!(AssetType::classify("AAPL"), AssetType::Stock);
        assert_eq!(AssetType::classify("MSFT"), AssetType::Stock);
        assert_eq!(AssetType::classify("UNKNOWN"), AssetType::Stock);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(AssetType::classify("btc"), AssetType::Crypto);
        assert_eq!(AssetType::classify("aapl"), AssetType::Stock);
    }

    #[test]
    fn display() {
        assert_eq!(AssetType::Crypto.to_string(), "Crypto");
        assert_eq!(AssetType::Stock.to_string(), "Stock");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionDraft validation
// ═══════════════════════════════════════════════════════════════════

mod draft_validation {
    use super::*;

    #[test]
    fn accepts_a_valid_buy() {
        let draft = TransactionDraft::new("BTC", 0.5, 40_000.0);
        let validated = draft.validate().unwrap();
        assert_eq!(validated.ticker, "BTC");
    }

    #[test]
    fn accepts_a_valid_sell() {
        let draft = TransactionDraft::new("ETH", -1.5, 2_500.0);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn normalizes_ticker_to_uppercase() {
        let draft = TransactionDraft::new("  btc ", 1.0, 100.0);
        let validated = draft.validate().unwrap();
        assert_eq!(validated.ticker, "BTC");
    }

    #[test]
    fn rejects_empty_ticker() {
        let draft = TransactionDraft::new("   ", 1.0, 100.0);
        assert!(matches!(
            draft.validate(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_zero_quantity() {
        let draft = TransactionDraft::new("BTC", 0.0, 100.0);
        assert!(matches!(
            draft.validate(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_nan_quantity() {
        let draft = TransactionDraft::new("BTC", f64::NAN, 100.0);
        assert!(matches!(
            draft.validate(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_infinite_quantity() {
        let draft = TransactionDraft::new("BTC", f64::INFINITY, 100.0);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn rejects_negative_price() {
        let draft = TransactionDraft::new("BTC", 1.0, -5.0);
        assert!(matches!(
            draft.validate(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn accepts_zero_price() {
        // Airdrops and grants legitimately have a zero cost
        let draft = TransactionDraft::new("BTC", 1.0, 0.0);
        assert!(draft.validate().is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceQuote
// ═══════════════════════════════════════════════════════════════════

mod price_quote {
    use super::*;

    #[test]
    fn new_uppercases_ticker() {
        let q = PriceQuote::new("btc", 100.0, 1.5);
        assert_eq!(q.ticker, "BTC");
        assert!(!q.is_simulated);
    }

    #[test]
    fn is_simulated_defaults_to_false_in_json() {
        let q: PriceQuote =
            serde_json::from_str(r#"{"ticker":"BTC","price":1.0,"change_percent_24h":0.0}"#)
                .unwrap();
        assert!(!q.is_simulated);
    }

    #[test]
    fn fallback_quote_uses_table_for_known_tickers() {
        let q = simulated::fallback_quote("BTC");
        assert!(q.is_simulated);
        assert!(q.price > 0.0);
        assert_eq!(q.ticker, "BTC");
    }

    #[test]
    fn fallback_quote_degrades_unknown_tickers_to_zero() {
        let q = simulated::fallback_quote("ZZZZ");
        assert!(q.is_simulated);
        assert_eq!(q.price, 0.0);
        assert_eq!(q.change_percent_24h, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  QuoteCache
// ═══════════════════════════════════════════════════════════════════

mod quote_cache {
    use super::*;

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn get_returns_fresh_entries() {
        let mut cache = QuoteCache::new();
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());

        let hit = cache.get("BTC", t0() + Duration::minutes(4));
        assert_eq!(hit.unwrap().price, 100.0);
    }

    #[test]
    fn get_is_case_insensitive() {
        let mut cache = QuoteCache::new();
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());
        assert!(cache.get("btc", t0()).is_some());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let mut cache = QuoteCache::new();
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());

        assert!(cache.get("BTC", t0() + Duration::minutes(6)).is_none());
        assert!(cache.is_expired("BTC", t0() + Duration::minutes(6)));
        assert!(!cache.is_expired("BTC", t0() + Duration::minutes(4)));
    }

    #[test]
    fn unknown_ticker_is_expired() {
        let cache = QuoteCache::new();
        assert!(cache.is_expired("ETH", t0()));
    }

    #[test]
    fn custom_ttl_is_respected() {
        let mut cache = QuoteCache::with_ttl(Duration::seconds(30));
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());

        assert!(cache.get("BTC", t0() + Duration::seconds(29)).is_some());
        assert!(cache.get("BTC", t0() + Duration::seconds(31)).is_none());
    }

    #[test]
    fn put_replaces_existing_entry() {
        let mut cache = QuoteCache::new();
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());
        cache.put(PriceQuote::new("BTC", 105.0, 2.0), t0() + Duration::minutes(1));

        assert_eq!(cache.len(), 1);
        let hit = cache.get("BTC", t0() + Duration::minutes(2)).unwrap();
        assert_eq!(hit.price, 105.0);
    }

    #[test]
    fn purge_expired_drops_stale_entries() {
        let mut cache = QuoteCache::new();
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());
        cache.put(PriceQuote::new("ETH", 10.0, 0.5), t0() + Duration::minutes(4));

        let removed = cache.purge_expired(t0() + Duration::minutes(6));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("ETH", t0() + Duration::minutes(6)).is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = QuoteCache::new();
        cache.put(PriceQuote::new("BTC", 100.0, 1.0), t0());
        cache.clear();
        assert!(cache.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Published summary shape
// ═══════════════════════════════════════════════════════════════════

mod summary_shape {
    use super::*;

    #[test]
    fn empty_summary_is_well_formed() {
        let summary = PortfolioSummary::empty();
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.daily_change_percent, 0.0);
        assert!(summary.positions.is_empty());
    }

    #[test]
    fn serializes_with_the_published_field_names() {
        let summary = PortfolioSummary {
            total_value: 50.0,
            daily_change_percent: 1.25,
            positions: vec![Position {
                ticker: "BTC".to_string(),
                net_quantity: 0.5,
                current_price: 100.0,
                change_percent_24h: 1.25,
                market_value: 50.0,
                percentage: 100.0,
                is_simulated: false,
            }],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_value"], 50.0);
        assert_eq!(json["daily_change_percent"], 1.25);
        let pos = &json["positions"][0];
        assert_eq!(pos["ticker"], "BTC");
        assert_eq!(pos["net_quantity"], 0.5);
        assert_eq!(pos["current_price"], 100.0);
        assert_eq!(pos["change_percent_24h"], 1.25);
        assert_eq!(pos["market_value"], 50.0);
        assert_eq!(pos["percentage"], 100.0);
    }

    #[test]
    fn summary_roundtrips_through_json() {
        let summary = PortfolioSummary {
            total_value: 210.0,
            daily_change_percent: 5.0,
            positions: Vec::new(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        let back: PortfolioSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
