use std::fmt;
use thiserror::Error;
use tracker_core::TransactionId;

/// Which store an operation was running against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Transactions,
    Traders,
    Contracts,
    Metrics,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreKind::Transactions => "transaction store",
            StoreKind::Traders => "trader store",
            StoreKind::Contracts => "contract store",
            StoreKind::Metrics => "metrics store",
        };
        f.write_str(name)
    }
}

/// A store could not complete a read or write
///
/// Never retried by the core; the logging service wraps it into its own
/// umbrella error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{store} unavailable: {reason}")]
    Unavailable { store: StoreKind, reason: String },

    #[error("Transaction {0} already exists")]
    DuplicateTransaction(TransactionId),
}

impl StoreError {
    pub fn unavailable(store: StoreKind, reason: impl Into<String>) -> Self {
        StoreError::Unavailable {
            store,
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
