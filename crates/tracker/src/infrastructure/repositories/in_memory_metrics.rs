use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracker_core::{MetricsSummary, TransactionId};
use tracker_ports::{MetricsRepository, StoreResult};

/// In-memory metrics store: latest summary per transaction id
pub struct InMemoryMetricsRepository {
    summaries: Arc<DashMap<TransactionId, MetricsSummary>>,
}

impl InMemoryMetricsRepository {
    pub fn new() -> Self {
        Self {
            summaries: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl Default for InMemoryMetricsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryMetricsRepository {
    fn clone(&self) -> Self {
        Self {
            summaries: Arc::clone(&self.summaries),
        }
    }
}

#[async_trait]
impl MetricsRepository for InMemoryMetricsRepository {
    async fn load(&self, id: TransactionId) -> StoreResult<Option<MetricsSummary>> {
        Ok(self.summaries.get(&id).map(|s| s.value().clone()))
    }

    async fn upsert(&self, summary: MetricsSummary) -> StoreResult<()> {
        self.summaries.insert(summary.transaction_id, summary);
        Ok(())
    }
}
