use std::sync::Arc;
use tracker_core::Timestamp;
use tracker_ports::Clock;

/// Instant a request started being handled
///
/// A plain value: whoever starts the timer passes it along explicitly to
/// whoever needs the elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestStart {
    at: Timestamp,
}

impl RequestStart {
    pub fn at(at: Timestamp) -> Self {
        Self { at }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.at
    }
}

/// Whole milliseconds from `start` to `end`, clamped to zero
pub fn elapsed_ms_between(start: Timestamp, end: Timestamp) -> u64 {
    u64::try_from((end - start).num_milliseconds()).unwrap_or(0)
}

/// Measures request handling time against a clock
pub struct RequestTimer<C: Clock> {
    clock: Arc<C>,
}

impl<C: Clock> RequestTimer<C> {
    pub fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Capture the start of request handling
    pub fn start(&self) -> RequestStart {
        RequestStart::at(self.clock.now())
    }

    /// Elapsed whole milliseconds since `start`; never negative
    pub fn elapsed_ms(&self, start: &RequestStart) -> u64 {
        elapsed_ms_between(start.at, self.clock.now())
    }

    pub fn clock(&self) -> &Arc<C> {
        &self.clock
    }
}

impl<C: Clock> Clone for RequestTimer<C> {
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
        }
    }
}
