use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::http::RequestError;
use crate::models::{ResponseInfo, KEY_LAST_METHOD, KEY_LAST_URL};
use crate::state::AppState;

/// Execute a request, remember it as the last one used, and record it in
/// history without waiting for the write.
pub async fn execute_request(
    state: &AppState,
    method: String,
    url: String,
) -> Result<ResponseInfo, String> {
    // Dropping the handle detaches the history write
    let (outcome, _history_write) = send_request(state, &method, &url).await;

    outcome.map_err(|e| format!("Error: {}", e))
}

/// Execute and start the history write, handing back its task handle so a
/// caller that is about to exit can wait for it.
///
/// A blank URL is rejected up front: nothing is sent, remembered or
/// recorded, and no handle is returned.
pub async fn send_request(
    state: &AppState,
    method: &str,
    url: &str,
) -> (Result<ResponseInfo, RequestError>, Option<JoinHandle<()>>) {
    let url = url.trim();
    if url.is_empty() {
        return (Err(RequestError::EmptyUrl), None);
    }

    remember_last_request(state, method, url).await;

    let outcome = state.executor.execute(method, url).await;
    if let Err(ref e) = outcome {
        log::warn!("{} {} failed: {}", method, url, e);
    }

    let history_write = state.recorder.record(method, url, &outcome);
    (outcome, Some(history_write))
}

/// Store the URL and method as the last used pair. Runs on the blocking
/// pool like the history write; failures are only logged.
async fn remember_last_request(state: &AppState, method: &str, url: &str) {
    let store = Arc::clone(&state.store);
    let (method, url) = (method.to_string(), url.to_string());

    let written = tokio::task::spawn_blocking(move || {
        store.set_preferences(&[(KEY_LAST_URL, url.as_str()), (KEY_LAST_METHOD, method.as_str())])
    })
    .await;

    match written {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::warn!("Failed to remember last request: {}", e),
        Err(e) => log::warn!("Failed to remember last request: {}", e),
    }
}
