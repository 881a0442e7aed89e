use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single response header occurrence. Repeated header names produce
/// one pair per value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Normalized result of one executed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub status: String,
    pub status_code: u16,
    pub body: String,
    pub headers: Vec<ResponseHeader>,
    /// Body length in bytes
    pub size: usize,
    pub response_time: Duration,
}

impl ResponseInfo {
    pub fn response_time_ms(&self) -> i64 {
        self.response_time.as_millis() as i64
    }

    /// Headers as the JSON array stored in `request_history.response_headers`.
    pub fn headers_json(&self) -> String {
        serde_json::to_string(&self.headers).unwrap_or_else(|_| "[]".to_string())
    }

    /// One-line status summary, e.g. `200 OK | 512 bytes | 12.00 ms`.
    pub fn summary(&self) -> String {
        format!(
            "{} | {} bytes | {:.2} ms",
            self.status,
            self.size,
            self.response_time.as_secs_f64() * 1000.0
        )
    }
}
