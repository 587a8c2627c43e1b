//! Tracker Core Domain
//!
//! Pure domain types for the API metrics tracker.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! The centre of the crate is [`MetricsSummary::fold`], the online aggregator
//! that turns a stream of observations for one transaction into a running
//! min/max/average/count summary.

pub mod entities;
pub mod metrics;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{DerivativeContract, Trader, Transaction, TransactionView};
pub use metrics::{InvalidObservation, MetricsSummary, Observation, ResponseStatus};
pub use values::{ContractId, Price, Timestamp, TraderId, TransactionId};
