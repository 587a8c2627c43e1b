use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracker_ports::Clock;

use super::handlers;
use crate::application::TransactionLoggingService;
use crate::infrastructure::{
    InMemoryContractRepository, InMemoryMetricsRepository, InMemoryTraderRepository,
    InMemoryTransactionRepository,
};

/// Logging service wired to the in-memory stores
pub type InMemoryLoggingService<C> = TransactionLoggingService<
    C,
    InMemoryTransactionRepository,
    InMemoryTraderRepository,
    InMemoryContractRepository,
    InMemoryMetricsRepository,
>;

/// Application state shared across handlers - uses concrete infrastructure types
pub struct AppState<C: Clock> {
    pub service: Arc<InMemoryLoggingService<C>>,
}

impl<C: Clock> AppState<C> {
    pub fn new(service: Arc<InMemoryLoggingService<C>>) -> Self {
        AppState { service }
    }
}

/// Create the REST API router
pub fn create_router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route(
            "/api/transactions/log",
            post(handlers::log_transaction::<C>),
        )
        .route(
            "/api/transactions/transaction/{transaction_id}",
            get(handlers::get_transaction::<C>),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
