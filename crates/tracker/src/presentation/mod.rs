pub mod rest;

pub use rest::{ApiError, AppState, InMemoryLoggingService, create_router};
