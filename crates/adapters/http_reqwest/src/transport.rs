//! `ReadingTransport` implementation over HTTP GET.

use std::future::Future;
use std::time::Duration;

use cactus_app::ports::{ReadingRequest, ReadingTransport, TransportError};

use crate::config::BackendConfig;
use crate::error::HttpError;

/// Upper bound on a single request when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Check that `endpoint` is an absolute `http(s)` URL without query or
/// fragment, so resource paths can be appended to it.
///
/// # Errors
///
/// Returns [`HttpError::InvalidEndpoint`] otherwise.
pub fn validate_endpoint(endpoint: &str) -> Result<(), HttpError> {
    let invalid = || HttpError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
    };
    let parsed = reqwest::Url::parse(endpoint).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https")
        || parsed.query().is_some()
        || parsed.fragment().is_some()
    {
        return Err(invalid());
    }
    Ok(())
}

/// Issues one GET per [`ReadingRequest`] against the backend endpoint.
///
/// Callers race each request against their own, shorter timer. The client
/// timeout only bounds how long an abandoned request keeps its connection.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    /// Build a transport for `endpoint` (e.g. `https://host` or `https://host/api`)
    /// with [`DEFAULT_REQUEST_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidEndpoint`] if [`validate_endpoint`] rejects
    /// `endpoint`, or [`HttpError::Client`] if the client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, HttpError> {
        Self::with_request_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Like [`new`](Self::new), failing every request still pending after
    /// `request_timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_request_timeout(endpoint: &str, request_timeout: Duration) -> Result<Self, HttpError> {
        validate_endpoint(endpoint)?;
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base: endpoint.trim_end_matches('/').to_owned(),
        })
    }

    /// Build a transport from the `[backend]` configuration section.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_config(config: &BackendConfig) -> Result<Self, HttpError> {
        Self::with_request_timeout(
            &config.endpoint,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// The endpoint with any trailing slash removed.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn build_request(&self, request: &ReadingRequest) -> Result<reqwest::Request, reqwest::Error> {
        let url = format!("{}{}", self.base, request.path());
        self.client.get(url).query(&request.query()).build()
    }
}

fn request_error(err: reqwest::Error) -> TransportError {
    TransportError::Request(Box::new(err))
}

impl ReadingTransport for HttpTransport {
    fn get(
        &self,
        request: &ReadingRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        let built = self.build_request(request);
        let client = self.client.clone();
        async move {
            let built = built.map_err(request_error)?;
            tracing::debug!(url = %built.url(), "GET");
            let response = client.execute(built).await.map_err(request_error)?;
            let status = response.status();
            if !status.is_success() {
                tracing::warn!(%status, "backend returned an error status");
                return Err(TransportError::Status(status.as_u16()));
            }
            let body = response.bytes().await.map_err(request_error)?;
            Ok(body.to_vec())
        }
    }
}
