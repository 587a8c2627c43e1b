use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracker_core::{Transaction, TransactionId};
use tracker_ports::{
    DuplicatePolicy, RecordedTransaction, StoreError, StoreResult, TransactionRepository,
};

/// In-memory transaction record store
///
/// Thread-safe storage for transactions using DashMap. What happens when an
/// id is recorded twice is decided by the configured [`DuplicatePolicy`].
pub struct InMemoryTransactionRepository {
    transactions: Arc<DashMap<TransactionId, Transaction>>,
    policy: DuplicatePolicy,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            transactions: Arc::new(DashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for InMemoryTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryTransactionRepository {
    fn clone(&self) -> Self {
        Self {
            transactions: Arc::clone(&self.transactions),
            policy: self.policy,
        }
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn record(&self, transaction: Transaction) -> StoreResult<RecordedTransaction> {
        let id = transaction.id;

        match self.transactions.entry(id) {
            Entry::Vacant(entry) => {
                entry.insert(transaction.clone());
                Ok(RecordedTransaction {
                    transaction,
                    created: true,
                    replaced: None,
                })
            }
            Entry::Occupied(mut entry) => match self.policy {
                DuplicatePolicy::KeepExisting => Ok(RecordedTransaction {
                    transaction: entry.get().clone(),
                    created: false,
                    replaced: None,
                }),
                DuplicatePolicy::Replace => {
                    let replaced = entry.insert(transaction.clone());
                    Ok(RecordedTransaction {
                        transaction,
                        created: false,
                        replaced: Some(replaced),
                    })
                }
                DuplicatePolicy::Reject => Err(StoreError::DuplicateTransaction(id)),
            },
        }
    }

    async fn get(&self, id: TransactionId) -> StoreResult<Option<Transaction>> {
        Ok(self.transactions.get(&id).map(|t| t.value().clone()))
    }

    async fn remove(&self, id: TransactionId) -> StoreResult<Option<Transaction>> {
        Ok(self.transactions.remove(&id).map(|(_, t)| t))
    }

    async fn restore(&self, transaction: Transaction) -> StoreResult<()> {
        self.transactions.insert(transaction.id, transaction);
        Ok(())
    }
}
