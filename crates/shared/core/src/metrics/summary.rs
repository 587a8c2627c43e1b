use serde::{Deserialize, Serialize};

use super::Observation;
use crate::values::{Timestamp, TransactionId};

/// Running response-time summary for one transaction id
///
/// The average is derived from an exact running sum, so it is always the
/// integer-truncated mean of every observation folded in, whatever order the
/// observations arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub transaction_id: TransactionId,
    /// Absent until the first observation
    pub min_response_time_ms: Option<u64>,
    /// Absent until the first observation
    pub max_response_time_ms: Option<u64>,
    pub avg_response_time_ms: u64,
    pub observation_count: u64,
    /// Sum of every elapsed time folded in
    pub total_response_time_ms: u128,
    /// `"<code> <reason phrase>"` of the latest observation
    pub last_status: String,
    pub last_updated_at: Timestamp,
}

impl MetricsSummary {
    /// Summary with no observations yet
    pub fn empty(transaction_id: TransactionId, at: Timestamp) -> Self {
        Self {
            transaction_id,
            min_response_time_ms: None,
            max_response_time_ms: None,
            avg_response_time_ms: 0,
            observation_count: 0,
            total_response_time_ms: 0,
            last_status: String::new(),
            last_updated_at: at,
        }
    }

    /// Combine a prior summary (if any) with a new observation.
    ///
    /// Pure and deterministic: the only input from outside is `at`, which
    /// stamps `last_updated_at`.
    pub fn fold(
        prior: Option<&MetricsSummary>,
        transaction_id: TransactionId,
        observation: &Observation,
        at: Timestamp,
    ) -> MetricsSummary {
        debug_assert!(prior.is_none_or(|p| p.transaction_id == transaction_id));

        let mut next = prior
            .cloned()
            .unwrap_or_else(|| MetricsSummary::empty(transaction_id, at));
        next.record(observation, at);
        next
    }

    /// Fold an observation into this summary in place
    pub fn record(&mut self, observation: &Observation, at: Timestamp) {
        let elapsed = observation.elapsed_ms();

        self.min_response_time_ms = Some(
            self.min_response_time_ms
                .map_or(elapsed, |min| min.min(elapsed)),
        );
        self.max_response_time_ms = Some(
            self.max_response_time_ms
                .map_or(elapsed, |max| max.max(elapsed)),
        );
        self.observation_count += 1;
        self.total_response_time_ms += u128::from(elapsed);
        // mean of u64 values always fits in u64
        self.avg_response_time_ms =
            (self.total_response_time_ms / u128::from(self.observation_count)) as u64;

        self.last_status = observation.status().to_string();
        self.last_updated_at = at;
    }

    pub fn is_empty(&self) -> bool {
        self.observation_count == 0
    }
}
