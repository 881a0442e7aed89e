//! Turns executed requests into history rows.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::db::sqlite::now_timestamp;
use crate::db::Store;
use crate::http::RequestError;
use crate::models::{RequestHistory, ResponseInfo, ERROR_STATUS};

#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    store: Arc<Store>,
}

impl HistoryRecorder {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Build the history row for one execution, stamped with the current time.
    /// Failed executions get the `Error` status and no response fields.
    pub fn build_entry(
        method: &str,
        url: &str,
        outcome: &Result<ResponseInfo, RequestError>,
    ) -> RequestHistory {
        let mut entry = RequestHistory::new(method, url);
        entry.timestamp = now_timestamp();

        match outcome {
            Ok(response) => {
                entry.response_status = Some(response.status.clone());
                entry.response_body = Some(response.body.clone());
                entry.response_headers = Some(response.headers_json());
                entry.response_time_ms = response.response_time_ms();
                entry.response_size = response.size as i64;
            }
            Err(_) => {
                entry.response_status = Some(ERROR_STATUS.to_string());
            }
        }

        entry
    }

    /// Persist the execution on a detached blocking task.
    ///
    /// Failures are logged and never reach the caller. The handle may be
    /// awaited or simply dropped.
    pub fn record(
        &self,
        method: &str,
        url: &str,
        outcome: &Result<ResponseInfo, RequestError>,
    ) -> JoinHandle<()> {
        let mut entry = Self::build_entry(method, url, outcome);
        let store = Arc::clone(&self.store);

        tokio::task::spawn_blocking(move || match store.save_history(&mut entry) {
            Ok(id) => log::debug!("Recorded history entry {} for {} {}", id, entry.method, entry.url),
            Err(e) => log::error!("Failed to save request to history: {}", e),
        })
    }
}
