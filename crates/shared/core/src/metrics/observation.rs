use thiserror::Error;

use super::ResponseStatus;

/// Rejected input to the aggregator
///
/// Programmer-error class: raised before any state is touched and never
/// worth retrying.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidObservation {
    #[error("Elapsed time cannot be negative: {0}ms")]
    NegativeElapsed(i64),

    #[error("Unknown response status code: {0}")]
    UnknownStatus(u16),
}

/// A single (elapsed time, outcome status) pair for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    elapsed_ms: u64,
    status: ResponseStatus,
}

impl Observation {
    /// Validate raw input into an observation
    pub fn new(elapsed_ms: i64, status_code: u16) -> Result<Self, InvalidObservation> {
        let elapsed_ms =
            u64::try_from(elapsed_ms).map_err(|_| InvalidObservation::NegativeElapsed(elapsed_ms))?;
        let status = ResponseStatus::from_code(status_code)?;

        Ok(Self { elapsed_ms, status })
    }

    /// Build from an already-validated status; elapsed is unsigned so this cannot fail
    pub fn with_status(elapsed_ms: u64, status: ResponseStatus) -> Self {
        Self { elapsed_ms, status }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_observation() {
        let obs = Observation::new(120, 201).unwrap();

        assert_eq!(obs.elapsed_ms(), 120);
        assert_eq!(obs.status(), ResponseStatus::CREATED);
    }

    #[test]
    fn test_zero_elapsed_is_valid() {
        assert_eq!(Observation::new(0, 200).unwrap().elapsed_ms(), 0);
    }

    #[test]
    fn test_negative_elapsed_rejected() {
        assert_eq!(
            Observation::new(-1, 201),
            Err(InvalidObservation::NegativeElapsed(-1))
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(
            Observation::new(10, 42),
            Err(InvalidObservation::UnknownStatus(42))
        );
    }
}
