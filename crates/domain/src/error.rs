//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! The domain only knows about invariant violations.

/// Errors raised when a domain invariant is violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An interval whose start is not strictly before its end.
    #[error("interval start must be before its end")]
    EmptyInterval,

    /// A time scale key that is not part of the closed set.
    #[error("unknown time scale {0:?}")]
    UnknownScale(String),
}
