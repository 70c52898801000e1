use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Append-only transaction log.
///
/// Stores are the validation boundary: `append` rejects malformed drafts
/// (empty ticker, zero/NaN quantity, negative price) so the valuation
/// engine only ever sees sanitized input. Transactions are never edited or
/// deleted — an offsetting transaction is the only way to adjust a position.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Validate a draft, assign an id and timestamp, and persist it.
    /// Returns the stored transaction.
    async fn append(&self, draft: TransactionDraft) -> Result<Transaction, CoreError>;

    /// Read the full log in insertion order.
    async fn list_all(&self) -> Result<Vec<Transaction>, CoreError>;
}
