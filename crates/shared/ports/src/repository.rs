use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracker_core::{
    ContractId, DerivativeContract, MetricsSummary, TraderId, Trader, Transaction, TransactionId,
};

use crate::error::StoreResult;

/// What the record store does when a transaction id is logged again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// First record stays canonical; later facts are ignored
    #[default]
    KeepExisting,
    /// Later facts overwrite the stored record
    Replace,
    /// Later logs fail with `StoreError::DuplicateTransaction`
    Reject,
}

/// Outcome of recording a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransaction {
    /// The canonical record as stored after the write
    pub transaction: Transaction,
    /// Whether this write created the record (false if the id already existed)
    pub created: bool,
    /// Record this write overwrote, if any
    pub replaced: Option<Transaction>,
}

/// Store of transaction facts keyed by transaction id
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Record a transaction, applying the store's duplicate policy
    async fn record(&self, transaction: Transaction) -> StoreResult<RecordedTransaction>;

    /// Get a transaction by ID
    async fn get(&self, id: TransactionId) -> StoreResult<Option<Transaction>>;

    /// Remove a transaction; used to undo a record whose logging failed
    async fn remove(&self, id: TransactionId) -> StoreResult<Option<Transaction>>;

    /// Put back a record overwritten by a failed logging, ignoring the policy
    async fn restore(&self, transaction: Transaction) -> StoreResult<()>;
}

/// Store of traders attached to transactions
#[async_trait]
pub trait TraderRepository: Send + Sync {
    /// Save a trader (insert or update), returning the one it replaced
    async fn save(&self, trader: Trader) -> StoreResult<Option<Trader>>;

    async fn get(&self, id: TraderId) -> StoreResult<Option<Trader>>;

    async fn remove(&self, id: TraderId) -> StoreResult<Option<Trader>>;

    /// All traders linked to a transaction
    async fn find_by_transaction(&self, transaction_id: TransactionId) -> StoreResult<Vec<Trader>>;
}

/// Store of derivative contracts attached to transactions
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Save a contract (insert or update), returning the one it replaced
    async fn save(&self, contract: DerivativeContract) -> StoreResult<Option<DerivativeContract>>;

    async fn get(&self, id: ContractId) -> StoreResult<Option<DerivativeContract>>;

    async fn remove(&self, id: ContractId) -> StoreResult<Option<DerivativeContract>>;

    /// All contracts linked to a transaction
    async fn find_by_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> StoreResult<Vec<DerivativeContract>>;
}

/// Latest metrics summary per transaction id
///
/// Plain load/upsert; callers serialize load-fold-store per id themselves.
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    async fn load(&self, id: TransactionId) -> StoreResult<Option<MetricsSummary>>;

    /// Insert or replace the summary for `summary.transaction_id`
    async fn upsert(&self, summary: MetricsSummary) -> StoreResult<()>;
}
