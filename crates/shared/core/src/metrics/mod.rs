//! Running response-time metrics
//!
//! - [`ResponseStatus`]: status code plus canonical reason phrase
//! - [`Observation`]: one validated (elapsed, status) pair
//! - [`MetricsSummary`]: the per-transaction running summary and its fold

mod observation;
mod status;
mod summary;

pub use observation::{InvalidObservation, Observation};
pub use status::ResponseStatus;
pub use summary::MetricsSummary;
