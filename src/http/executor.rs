use reqwest::{Client, Method, Url};
use std::time::{Duration, Instant};

use crate::http::error::RequestError;
use crate::models::{ResponseHeader, ResponseInfo};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes single outbound HTTP requests. No retries; the timeout bounds
/// the whole exchange including the body download.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new() -> Result<Self, RequestError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, RequestError> {
        Self::with_options(timeout, true)
    }

    /// `use_system_proxy = false` ignores `HTTP_PROXY`-style environment
    /// variables and connects directly.
    pub fn with_options(timeout: Duration, use_system_proxy: bool) -> Result<Self, RequestError> {
        let mut builder = Client::builder().timeout(timeout);
        if !use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| RequestError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `method url` and read the full response.
    ///
    /// Any status code the server returns is a successful execution; only
    /// transport failures produce an error.
    pub async fn execute(&self, method: &str, url: &str) -> Result<ResponseInfo, RequestError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RequestError::EmptyUrl);
        }

        let method = parse_method(method)?;
        let url = parse_url(url)?;

        log::debug!("Executing {} {}", method, url);
        let start = Instant::now();

        let response = self.client.request(method, url).send().await?;

        let status = response.status();
        let headers: Vec<ResponseHeader> = response
            .headers()
            .iter()
            .map(|(name, value)| ResponseHeader {
                key: name.as_str().to_string(),
                value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            })
            .collect();

        let body = response.bytes().await?;
        let response_time = start.elapsed();

        let status_text = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };

        log::debug!("Received {} ({} bytes) in {:?}", status_text, body.len(), response_time);

        Ok(ResponseInfo {
            status: status_text,
            status_code: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
            headers,
            size: body.len(),
            response_time,
        })
    }
}

fn parse_method(method: &str) -> Result<Method, RequestError> {
    let normalized = method.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(RequestError::InvalidMethod(method.to_string()));
    }
    Method::from_bytes(normalized.as_bytes()).map_err(|_| RequestError::InvalidMethod(method.to_string()))
}

fn parse_url(url: &str) -> Result<Url, RequestError> {
    let parsed = Url::parse(url).map_err(|e| RequestError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(RequestError::InvalidUrl(format!("unsupported scheme '{}'", other))),
    }
}
