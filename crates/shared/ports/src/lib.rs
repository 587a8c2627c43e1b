//! Tracker Ports
//!
//! Port definitions (traits) for the API metrics tracker.
//! These define the boundaries between the logging service and storage/time.

mod clock;
mod error;
mod repository;

pub use clock::Clock;
pub use error::{StoreError, StoreKind, StoreResult};
pub use repository::{
    ContractRepository, DuplicatePolicy, MetricsRepository, RecordedTransaction,
    TraderRepository, TransactionRepository,
};
