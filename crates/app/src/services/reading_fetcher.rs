//! Reading fetcher — timeout-bounded retrieval and normalization of readings.

use std::sync::Arc;
use std::time::Duration;

use cactus_domain::reading::{NormalizedReading, WireReading};
use cactus_domain::scale::{Interval, ScaleResolver, TimeScale};
use cactus_domain::time::Timestamp;
use tokio::sync::oneshot;

use crate::error::FetchError;
use crate::ports::{ReadingRequest, ReadingTransport};

/// Fetches readings through a [`ReadingTransport`], bounded by a timeout.
///
/// Every call issues exactly one request. There is no caching, no retry,
/// and no ordering between concurrent calls: callers that fire several
/// fetches are responsible for discarding stale results (see
/// [`LatestRequest`](crate::latest_request::LatestRequest)).
pub struct ReadingFetcher<T> {
    transport: Arc<T>,
}

impl<T> Clone for ReadingFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: ReadingTransport + 'static> ReadingFetcher<T> {
    /// Create a new fetcher backed by the given transport.
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Create a fetcher sharing an existing transport.
    pub fn from_shared(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Fetch every reading between `start` and `end`, in the order the
    /// backend returned them.
    ///
    /// `resolution` caps the number of points the backend returns; `0`
    /// asks for full density.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] when `timeout_ms` elapses first,
    /// [`FetchError::Network`] when the transport fails,
    /// [`FetchError::Parse`] when the body is not a JSON array of readings,
    /// and [`FetchError::InvalidTimeout`] when `timeout_ms` is zero.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_range(
        &self,
        start: Timestamp,
        end: Timestamp,
        resolution: u32,
        timeout_ms: u64,
    ) -> Result<Vec<NormalizedReading>, FetchError> {
        let request = ReadingRequest::Range {
            start,
            end,
            resolution,
        };
        let body = self.race(request, timeout_ms).await?;
        let wire: Vec<WireReading> = serde_json::from_slice(&body)?;
        tracing::debug!(count = wire.len(), "readings received");
        Ok(wire.iter().map(NormalizedReading::from_wire).collect())
    }

    /// Fetch the latest reading.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_range`](Self::fetch_range), with [`FetchError::Parse`]
    /// raised when the body is not a single reading object.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_current(&self, timeout_ms: u64) -> Result<NormalizedReading, FetchError> {
        let body = self.race(ReadingRequest::Current, timeout_ms).await?;
        let wire: WireReading = serde_json::from_slice(&body)?;
        Ok(NormalizedReading::from_wire(&wire))
    }

    /// [`fetch_range`](Self::fetch_range) over a validated interval.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_range`](Self::fetch_range).
    pub async fn fetch_interval(
        &self,
        interval: Interval,
        resolution: u32,
        timeout_ms: u64,
    ) -> Result<Vec<NormalizedReading>, FetchError> {
        self.fetch_range(interval.start(), interval.end(), resolution, timeout_ms)
            .await
    }

    /// Resolve `scale` against `now` and fetch the resulting window.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_range`](Self::fetch_range).
    pub async fn fetch_scale(
        &self,
        resolver: &ScaleResolver,
        scale: TimeScale,
        now: Timestamp,
        resolution: u32,
        timeout_ms: u64,
    ) -> Result<Vec<NormalizedReading>, FetchError> {
        let interval = resolver.interval_for(scale, now);
        self.fetch_interval(interval, resolution, timeout_ms).await
    }

    /// Race one transport call against a timer. First to settle wins.
    ///
    /// The call runs in its own task and reports through a oneshot channel.
    /// When the timer wins, the receiver is dropped: the request is left to
    /// finish on its own and its outcome is discarded.
    async fn race(&self, request: ReadingRequest, timeout_ms: u64) -> Result<Vec<u8>, FetchError> {
        if timeout_ms == 0 {
            return Err(FetchError::InvalidTimeout);
        }

        let (tx, rx) = oneshot::channel();
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let outcome = transport.get(&request).await;
            if tx.send(outcome).is_err() {
                tracing::debug!(path = request.path(), "discarding response that settled after the timeout");
            }
        });

        tokio::select! {
            biased;
            outcome = rx => match outcome {
                Ok(result) => result.map_err(|err| {
                    tracing::warn!(error = %err, "transport failed");
                    FetchError::from(err)
                }),
                Err(_) => Err(FetchError::Aborted),
            },
            () = tokio::time::sleep(Duration::from_millis(timeout_ms)) => {
                tracing::warn!(timeout_ms, "request timed out");
                Err(FetchError::Timeout { after_ms: timeout_ms })
            }
        }
    }
}
