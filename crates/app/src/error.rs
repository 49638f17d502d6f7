//! Errors returned by the reading use-cases.

use crate::ports::TransportError;

/// Why a fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The timer elapsed before the transport settled.
    #[error("request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The transport failed before the timer elapsed.
    #[error("network error")]
    Network(#[from] TransportError),

    /// The body did not decode as the expected wire shape.
    #[error("failed to decode readings")]
    Parse(#[from] serde_json::Error),

    /// A zero timeout was requested.
    #[error("timeout must be greater than zero")]
    InvalidTimeout,

    /// The task driving the request ended without reporting an outcome.
    #[error("fetch task ended without a result")]
    Aborted,
}

/// Field-less discriminant of [`FetchError`], handy for matching and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Network,
    Parse,
    InvalidTimeout,
    Aborted,
}

impl FetchError {
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Timeout { .. } => FetchErrorKind::Timeout,
            Self::Network(_) => FetchErrorKind::Network,
            Self::Parse(_) => FetchErrorKind::Parse,
            Self::InvalidTimeout => FetchErrorKind::InvalidTimeout,
            Self::Aborted => FetchErrorKind::Aborted,
        }
    }
}
