use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Status recorded for requests that failed before a response arrived.
pub const ERROR_STATUS: &str = "Error";

/// One executed request and its outcome. Rows are never updated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestHistory {
    #[serde(default)]
    pub id: i64,
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<String>,
    #[serde(default)]
    pub response_time_ms: i64,
    #[serde(default)]
    pub response_size: i64,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
}

impl RequestHistory {
    /// A fresh, unsaved entry stamped with the current time.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        RequestHistory {
            id: 0,
            url: url.into(),
            method: method.into(),
            headers: None,
            body: None,
            timestamp: Utc::now(),
            response_status: None,
            response_body: None,
            response_headers: None,
            response_time_ms: 0,
            response_size: 0,
            is_favorite: false,
            collection_id: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.response_status.as_deref() == Some(ERROR_STATUS)
    }
}

/// Human friendly age of a history entry, e.g. "5 mins ago".
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;

    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        plural(diff.num_minutes(), "min")
    } else if diff < Duration::days(1) {
        plural(diff.num_hours(), "hour")
    } else if diff < Duration::days(7) {
        plural(diff.num_days(), "day")
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
