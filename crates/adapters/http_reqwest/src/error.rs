//! HTTP adapter error types.

/// Errors raised while setting up the HTTP transport.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The configured endpoint is not an absolute `http(s)` URL.
    #[error("invalid backend endpoint {endpoint:?}")]
    InvalidEndpoint { endpoint: String },

    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_endpoint_error() {
        let err = HttpError::InvalidEndpoint {
            endpoint: "ftp://x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid backend endpoint \"ftp://x\"");
    }
}
