use http::StatusCode;
use std::fmt;

use super::InvalidObservation;

/// Outcome status of a request, rendered as `"<code> <reason phrase>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseStatus {
    code: u16,
    reason: &'static str,
}

impl ResponseStatus {
    pub const OK: ResponseStatus = ResponseStatus {
        code: 200,
        reason: "OK",
    };
    pub const CREATED: ResponseStatus = ResponseStatus {
        code: 201,
        reason: "Created",
    };

    /// Look up the canonical reason phrase for a status code.
    ///
    /// Codes without a registered reason phrase are rejected, which also
    /// covers everything outside `100..=599`.
    pub fn from_code(code: u16) -> Result<Self, InvalidObservation> {
        let reason = StatusCode::from_u16(code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .ok_or(InvalidObservation::UnknownStatus(code))?;

        Ok(Self { code, reason })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}
