use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use super::traits::TransactionStore;
use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionDraft};

/// In-memory transaction log. Ephemeral — nothing survives the process.
/// Useful for tests and for running the dashboard without persistence.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    transactions: Mutex<Vec<Transaction>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn append(&self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let validated = draft.validate()?;
        let transaction = validated.into_transaction(Utc::now());
        let mut guard = self
            .transactions
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        guard.push(transaction.clone());
        Ok(transaction)
    }

    async fn list_all(&self) -> Result<Vec<Transaction>, CoreError> {
        let guard = self
            .transactions
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }
}
