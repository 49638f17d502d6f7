//! Transport port — a single GET against the readings backend.
//!
//! The adapter only moves bytes. Decoding, normalization, and the timeout
//! race live in [`ReadingFetcher`](crate::services::reading_fetcher::ReadingFetcher).

use std::future::Future;

use cactus_domain::time::{Timestamp, to_wire};

/// Resource path of the reading history.
pub const READINGS_PATH: &str = "/readings";
/// Resource path of the latest reading.
pub const CURRENT_READING_PATH: &str = "/readings/current";

/// What to ask the backend for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingRequest {
    /// All readings between `start` and `end`, downsampled to at most
    /// `resolution` points when `resolution > 0`.
    Range {
        start: Timestamp,
        end: Timestamp,
        resolution: u32,
    },
    /// The most recent reading.
    Current,
}

impl ReadingRequest {
    /// Path relative to the configured endpoint.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Range { .. } => READINGS_PATH,
            Self::Current => CURRENT_READING_PATH,
        }
    }

    /// Query-string pairs, in the order they should be sent.
    ///
    /// `resolution` is omitted entirely when zero (maximum density).
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Range {
                start,
                end,
                resolution,
            } => {
                let mut pairs = vec![("start", to_wire(*start)), ("end", to_wire(*end))];
                if *resolution > 0 {
                    pairs.push(("resolution", resolution.to_string()));
                }
                pairs
            }
            Self::Current => Vec::new(),
        }
    }
}

/// Transport-level failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// DNS, connection, TLS, or body-read failure.
    #[error("request failed")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Outbound port to the readings backend.
///
/// Implementations issue exactly one request per call and return the raw
/// response body of a successful (2xx) response.
pub trait ReadingTransport: Send + Sync {
    fn get(
        &self,
        request: &ReadingRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}
