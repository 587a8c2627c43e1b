use thiserror::Error;
use tracker_core::{InvalidObservation, TransactionId};
use tracker_ports::StoreError;

/// Failure of a logging operation
///
/// `InvalidObservation` is a caller bug and should not be retried.
/// `LoggingFailed` wraps whichever store call failed; the boundary may retry it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Invalid observation: {0}")]
    InvalidObservation(#[from] InvalidObservation),

    #[error("Logging transaction {transaction_id} failed: {source}")]
    LoggingFailed {
        transaction_id: TransactionId,
        #[source]
        source: StoreError,
    },
}

impl LoggingError {
    pub fn failed(transaction_id: TransactionId, source: StoreError) -> Self {
        LoggingError::LoggingFailed {
            transaction_id,
            source,
        }
    }

    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LoggingError::InvalidObservation(_) => false,
            LoggingError::LoggingFailed { source, .. } => {
                matches!(source, StoreError::Unavailable { .. })
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LoggingError>;
