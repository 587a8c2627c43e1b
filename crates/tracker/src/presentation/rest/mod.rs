mod dto;
mod error;
mod handlers;
mod router;

pub use dto::*;
pub use error::ApiError;
pub use router::{AppState, InMemoryLoggingService, create_router};
