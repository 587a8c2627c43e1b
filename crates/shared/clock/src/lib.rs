//! Tracker Clock Infrastructure
//!
//! Time sources and request timing:
//!
//! - [`MonotonicClock`]: wall-clock anchored once, then advanced by a
//!   monotonic `Instant`, so it never reads earlier than a previous reading
//! - [`ManualClock`]: only moves when told to (deterministic tests)
//! - [`RequestTimer`]: captures a [`RequestStart`] when a request begins and
//!   turns it into whole elapsed milliseconds when it completes
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tracker_clock::{MonotonicClock, RequestTimer};
//!
//! let timer = RequestTimer::new(Arc::new(MonotonicClock::new()));
//! let started = timer.start();
//! // ... handle the request, passing `started` along ...
//! let elapsed_ms = timer.elapsed_ms(&started);
//! ```

mod manual;
mod monotonic;
mod timer;

pub use manual::ManualClock;
pub use monotonic::MonotonicClock;
pub use timer::{RequestStart, RequestTimer, elapsed_ms_between};

// Re-export the Clock trait for convenience
pub use tracker_ports::Clock;
