use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracker_core::{ContractId, DerivativeContract, TransactionId};
use tracker_ports::{ContractRepository, StoreResult};

/// In-memory derivative contract store keyed by contract id
pub struct InMemoryContractRepository {
    contracts: Arc<DashMap<ContractId, DerivativeContract>>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self {
            contracts: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryContractRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryContractRepository {
    fn clone(&self) -> Self {
        Self {
            contracts: Arc::clone(&self.contracts),
        }
    }
}

#[async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn save(&self, contract: DerivativeContract) -> StoreResult<Option<DerivativeContract>> {
        Ok(self.contracts.insert(contract.id, contract))
    }

    async fn get(&self, id: ContractId) -> StoreResult<Option<DerivativeContract>> {
        Ok(self.contracts.get(&id).map(|c| c.value().clone()))
    }

    async fn remove(&self, id: ContractId) -> StoreResult<Option<DerivativeContract>> {
        Ok(self.contracts.remove(&id).map(|(_, c)| c))
    }

    async fn find_by_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> StoreResult<Vec<DerivativeContract>> {
        Ok(self
            .contracts
            .iter()
            .filter(|e| e.value().transaction_id == transaction_id)
            .map(|e| e.value().clone())
            .collect())
    }
}
