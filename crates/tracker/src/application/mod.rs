pub mod logging_service;
pub mod metrics_recorder;

pub use logging_service::{
    ContractDetails, LogTransactionCommand, LogTransactionResult, TraderDetails,
    TransactionLoggingService,
};
pub use metrics_recorder::MetricsRecorder;
