mod in_memory_contract;
mod in_memory_metrics;
mod in_memory_trader;
mod in_memory_transaction;

pub use in_memory_contract::InMemoryContractRepository;
pub use in_memory_metrics::InMemoryMetricsRepository;
pub use in_memory_trader::InMemoryTraderRepository;
pub use in_memory_transaction::InMemoryTransactionRepository;
