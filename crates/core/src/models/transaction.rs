use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// A single buy/sell transaction in the portfolio log.
///
/// Quantity is signed: positive = acquisition (buy), negative = disposal
/// (sell). The execution `price` is recorded for bookkeeping only — current
/// valuation always uses live quotes, not the price paid.
///
/// Transactions are immutable once appended. There is no correction or
/// reversal operation; an offsetting transaction is the only way to adjust
/// a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store on append
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "BTC", "AAPL")
    pub ticker: String,

    /// Signed quantity: positive = buy, negative = sell. Never zero.
    pub quantity: f64,

    /// Per-unit execution price at transaction time (non-negative)
    pub price: f64,

    /// Creation time. Used for ordering/history, not for valuation math.
    pub timestamp: DateTime<Utc>,
}

/// Unvalidated input for appending a transaction.
///
/// Stores validate a draft and assign `id`/`timestamp` on append, so the
/// valuation engine only ever sees sanitized transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub ticker: String,
    pub quantity: f64,
    pub price: f64,
}

impl TransactionDraft {
    pub fn new(ticker: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self {
            ticker: ticker.into(),
            quantity,
            price,
        }
    }

    /// Validate the draft and normalize the ticker to uppercase.
    ///
    /// Rules:
    /// - Ticker must be non-empty after trimming
    /// - Quantity must be finite and non-zero
    /// - Price must be finite and non-negative
    pub fn validate(&self) -> Result<TransactionDraft, CoreError> {
        let ticker = self.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(CoreError::ValidationError(
                "Ticker must not be empty".into(),
            ));
        }
        if !self.quantity.is_finite() || self.quantity == 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Quantity must be finite and non-zero, got {}",
                self.quantity
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Price must be finite and non-negative, got {}",
                self.price
            )));
        }
        Ok(TransactionDraft {
            ticker,
            quantity: self.quantity,
            price: self.price,
        })
    }

    /// Turn a validated draft into a stored transaction with a fresh id.
    /// Called by stores on append, never by callers directly.
    pub(crate) fn into_transaction(self, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            ticker: self.ticker,
            quantity: self.quantity,
            price: self.price,
            timestamp,
        }
    }
}
