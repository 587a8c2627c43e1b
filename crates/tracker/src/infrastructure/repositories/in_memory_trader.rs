use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracker_core::{TraderId, Trader, TransactionId};
use tracker_ports::{StoreResult, TraderRepository};

/// In-memory trader store keyed by trader id
pub struct InMemoryTraderRepository {
    traders: Arc<DashMap<TraderId, Trader>>,
}

impl InMemoryTraderRepository {
    pub fn new() -> Self {
        Self {
            traders: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryTraderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryTraderRepository {
    fn clone(&self) -> Self {
        Self {
            traders: Arc::clone(&self.traders),
        }
    }
}

#[async_trait]
impl TraderRepository for InMemoryTraderRepository {
    async fn save(&self, trader: Trader) -> StoreResult<Option<Trader>> {
        Ok(self.traders.insert(trader.id, trader))
    }

    async fn get(&self, id: TraderId) -> StoreResult<Option<Trader>> {
        Ok(self.traders.get(&id).map(|t| t.value().clone()))
    }

    async fn remove(&self, id: TraderId) -> StoreResult<Option<Trader>> {
        Ok(self.traders.remove(&id).map(|(_, t)| t))
    }

    async fn find_by_transaction(&self, transaction_id: TransactionId) -> StoreResult<Vec<Trader>> {
        Ok(self
            .traders
            .iter()
            .filter(|e| e.value().transaction_id == transaction_id)
            .map(|e| e.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_save_links_to_transaction() {
        let repo = InMemoryTraderRepository::new();
        let tx_id = TransactionId::new(10);

        repo.save(Trader::new(1, "Alice", dec!(5000), "555-0100", tx_id))
            .await
            .unwrap();
        repo.save(Trader::new(2, "Bob", dec!(10), "555-0101", TransactionId::new(11)))
            .await
            .unwrap();

        let linked = repo.find_by_transaction(tx_id).await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_save_upserts_by_trader_id() {
        let repo = InMemoryTraderRepository::new();
        let tx_id = TransactionId::new(10);

        repo.save(Trader::new(1, "Alice", dec!(5000), "555-0100", tx_id))
            .await
            .unwrap();
        let replaced = repo
            .save(Trader::new(1, "Alice", dec!(4200), "555-0100", tx_id))
            .await
            .unwrap();

        assert_eq!(replaced.unwrap().account_balance, dec!(5000));
        let trader = repo.get(TraderId::new(1)).await.unwrap().unwrap();
        assert_eq!(trader.account_balance, dec!(4200));
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryTraderRepository::new();
        repo.save(Trader::new(3, "Carol", dec!(1), "555-0102", TransactionId::new(1)))
            .await
            .unwrap();

        let removed = repo.remove(TraderId::new(3)).await.unwrap();

        assert_eq!(removed.unwrap().name, "Carol");
        assert_eq!(repo.get(TraderId::new(3)).await.unwrap(), None);
    }
}
