//! API Metrics Tracker
//!
//! Logs trades on derivative contracts and keeps, per transaction id, a
//! running summary of how long the requests touching that transaction took.
//!
//! # Architecture
//!
//! - **Application**: the logging service and concurrency-safe metrics access
//! - **Infrastructure**: in-memory stores, the keyed lock registry, configuration
//! - **Presentation**: REST handlers
//!
//! Domain types and the aggregator itself live in `tracker-core`; the store
//! and clock traits in `tracker-ports`.
//!
//! # Example
//!
//! ```ignore
//! use metrics_tracker::{TrackerConfig, TrackerServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = TrackerServer::new(TrackerConfig::default());
//!     server.run().await.unwrap();
//! }
//! ```

pub mod application;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::{
    ContractDetails, LogTransactionCommand, LogTransactionResult, MetricsRecorder, TraderDetails,
    TransactionLoggingService,
};
pub use error::LoggingError;
pub use infrastructure::{
    ConfigError, InMemoryContractRepository, InMemoryMetricsRepository, InMemoryTraderRepository,
    InMemoryTransactionRepository, KeyedLocks, ServerConfig, TrackerConfig,
};
pub use presentation::{AppState, InMemoryLoggingService, create_router};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracker_clock::MonotonicClock;
use tracker_ports::Clock;

/// The tracker service: stores, logging service and REST router wired together
pub struct TrackerServer<C: Clock + 'static> {
    pub config: TrackerConfig,
    pub transaction_repo: Arc<InMemoryTransactionRepository>,
    pub trader_repo: Arc<InMemoryTraderRepository>,
    pub contract_repo: Arc<InMemoryContractRepository>,
    pub metrics_repo: Arc<InMemoryMetricsRepository>,
    pub service: Arc<InMemoryLoggingService<C>>,
}

impl<C: Clock + 'static> TrackerServer<C> {
    /// Create a tracker with the given clock
    pub fn with_clock(config: TrackerConfig, clock: Arc<C>) -> Self {
        let transaction_repo = Arc::new(InMemoryTransactionRepository::with_policy(
            config.duplicate_policy,
        ));
        let trader_repo = Arc::new(InMemoryTraderRepository::new());
        let contract_repo = Arc::new(InMemoryContractRepository::new());
        let metrics_repo = Arc::new(InMemoryMetricsRepository::new());

        let service = Arc::new(TransactionLoggingService::new(
            clock,
            Arc::clone(&transaction_repo),
            Arc::clone(&trader_repo),
            Arc::clone(&contract_repo),
            Arc::clone(&metrics_repo),
        ));

        TrackerServer {
            config,
            transaction_repo,
            trader_repo,
            contract_repo,
            metrics_repo,
            service,
        }
    }

    /// Create the REST API router
    pub fn router(&self) -> Router {
        create_router(Arc::new(AppState::new(Arc::clone(&self.service))))
    }

    /// Run the HTTP server until it fails
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.server.bind_addr();
        let router = self.router();

        tracing::info!(
            name = %self.config.name,
            duplicate_policy = ?self.config.duplicate_policy,
            "Metrics tracker listening on {}",
            addr
        );

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

impl TrackerServer<MonotonicClock> {
    /// Create a tracker on the production clock
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }
}
