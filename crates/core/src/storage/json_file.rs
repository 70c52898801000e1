use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::traits::TransactionStore;
use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Transaction log persisted as a plain JSON array on disk.
///
/// Append is read-modify-write of the whole file, serialized by an internal
/// lock. A missing file reads as an empty log; a corrupt file surfaces a
/// deserialization error rather than silently discarding history.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles so concurrent appends can't
    // clobber each other within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_log(&self) -> Result<Vec<Transaction>, CoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(&self.path)?;
        let transactions: Vec<Transaction> = serde_json::from_slice(&bytes)?;
        Ok(transactions)
    }

    fn write_log(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        let json = serde_json::to_vec_pretty(transactions)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize log: {e}")))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for JsonFileStore {
    async fn append(&self, draft: TransactionDraft) -> Result<Transaction, CoreError> {
        let validated = draft.validate()?;
        let transaction = validated.into_transaction(Utc::now());

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut log = self.read_log()?;
        log.push(transaction.clone());
        self.write_log(&log)?;

        Ok(transaction)
    }

    async fn list_all(&self) -> Result<Vec<Transaction>, CoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read_log()
    }
}
