use std::sync::Arc;
use tracker_core::{MetricsSummary, Observation, TransactionId};
use tracker_ports::{Clock, MetricsRepository, StoreResult};

use crate::infrastructure::{KeyedGuard, KeyedLocks};

/// Concurrency-safe access to the metrics store
///
/// Every load-fold-store runs under the per-transaction lock, so two
/// observations for the same id can never fold from the same prior summary.
/// Different ids proceed in parallel.
pub struct MetricsRecorder<C, M>
where
    C: Clock,
    M: MetricsRepository,
{
    clock: Arc<C>,
    metrics: Arc<M>,
    locks: KeyedLocks<TransactionId>,
}

impl<C, M> MetricsRecorder<C, M>
where
    C: Clock,
    M: MetricsRepository,
{
    pub fn new(clock: Arc<C>, metrics: Arc<M>) -> Self {
        Self {
            clock,
            metrics,
            locks: KeyedLocks::new(),
        }
    }

    /// Take the per-transaction lock
    ///
    /// Callers that need more than the fold inside the critical section hold
    /// this guard and pass it to [`record_held`](Self::record_held).
    pub async fn lock(&self, transaction_id: TransactionId) -> KeyedGuard<TransactionId> {
        self.locks.lock(transaction_id).await
    }

    /// Fold under a lock the caller already holds
    pub async fn record_held(
        &self,
        guard: &KeyedGuard<TransactionId>,
        observation: &Observation,
    ) -> StoreResult<MetricsSummary> {
        let transaction_id = *guard.key();

        let prior = self.metrics.load(transaction_id).await?;
        let summary = MetricsSummary::fold(
            prior.as_ref(),
            transaction_id,
            observation,
            self.clock.now(),
        );
        self.metrics.upsert(summary.clone()).await?;

        tracing::debug!(
            transaction_id = %transaction_id,
            elapsed_ms = observation.elapsed_ms(),
            count = summary.observation_count,
            avg_ms = summary.avg_response_time_ms,
            "Metrics folded"
        );

        Ok(summary)
    }

    pub async fn summary(&self, transaction_id: TransactionId) -> StoreResult<Option<MetricsSummary>> {
        self.metrics.load(transaction_id).await
    }
}
