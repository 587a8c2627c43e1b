use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracker_core::Timestamp;
use tracker_ports::Clock;

/// Clock that only moves when told to
///
/// Thread-safe; clones share the same time. Time may be set backwards,
/// which is how tests exercise the timer's clamp.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<RwLock<Timestamp>>,
}

impl ManualClock {
    /// Create a clock fixed at a specific time
    pub fn at(time: Timestamp) -> Self {
        Self {
            inner: Arc::new(RwLock::new(time)),
        }
    }

    /// Create a clock fixed at the Unix epoch
    pub fn epoch() -> Self {
        Self::at(Timestamp::default())
    }

    /// Advance time by a duration (negative durations move it back)
    pub fn advance(&self, duration: Duration) {
        let mut time = self.inner.write();
        *time += duration;
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }

    /// Set time to a specific value
    pub fn set_time(&self, time: Timestamp) {
        *self.inner.write() = time;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.inner.read()
    }
}
