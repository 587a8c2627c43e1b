pub mod config;
pub mod keyed_locks;
pub mod repositories;

pub use config::{ConfigError, ServerConfig, TrackerConfig};
pub use keyed_locks::{KeyedGuard, KeyedLocks};
pub use repositories::{
    InMemoryContractRepository, InMemoryMetricsRepository, InMemoryTraderRepository,
    InMemoryTransactionRepository,
};
