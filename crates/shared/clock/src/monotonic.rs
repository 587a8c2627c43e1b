use chrono::{DateTime, Duration, Utc};
use std::time::Instant;
use tracker_core::Timestamp;
use tracker_ports::Clock;

/// Production clock
///
/// Reads the wall clock once at construction and advances from there with
/// `Instant`, so NTP steps on the host cannot make it run backwards.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    anchor_wall: Timestamp,
    anchor_instant: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            anchor_wall: Utc::now(),
            anchor_instant: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Duration::from_std(self.anchor_instant.elapsed())
            .ok()
            .and_then(|elapsed| self.anchor_wall.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
