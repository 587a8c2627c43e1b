use tracker_core::Timestamp;

/// Port for time abstraction
///
/// This allows the system to use different time sources:
/// - Monotonic wall-anchored time for production
/// - Manually driven time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;
}
