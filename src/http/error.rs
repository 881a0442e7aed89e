//! Transport-level failures while executing a request.
//!
//! An HTTP error status (4xx, 5xx) is not one of these: the executor
//! reports it as a normal response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// No URL was given.
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No complete response within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// DNS, connect, TLS and other network failures.
    #[error("network error: {0}")]
    Network(String),

    /// The response started but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::InvalidUrl(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RequestError::Body(err.to_string())
        } else {
            RequestError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RequestError::Timeout.to_string(), "request timed out");
        assert_eq!(
            RequestError::Network("connection refused".to_string()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            RequestError::InvalidMethod("GE T".to_string()).to_string(),
            "invalid HTTP method: GE T"
        );
        assert_eq!(RequestError::EmptyUrl.to_string(), "Please enter a URL");
    }
}
