use std::path::PathBuf;

use crate::models::RequestHistory;
use crate::state::AppState;

/// Load a page of history, newest first
pub async fn load_history(
    state: &AppState,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<RequestHistory>, String> {
    state
        .store
        .list_history(
            limit.unwrap_or(state.config.history_page_size),
            offset.unwrap_or(0),
        )
        .map_err(|e| format!("Failed to load history: {}", e))
}

/// Search history by URL, method or status. A blank term loads the
/// first page instead.
pub async fn search_history(
    state: &AppState,
    term: String,
    limit: Option<i64>,
) -> Result<Vec<RequestHistory>, String> {
    if term.is_empty() {
        return load_history(state, limit, None).await;
    }

    state
        .store
        .search_history(&term, limit.unwrap_or(state.config.history_page_size))
        .map_err(|e| format!("Failed to search history: {}", e))
}

pub async fn delete_history_entry(state: &AppState, entry_id: i64) -> Result<bool, String> {
    state
        .store
        .delete_history(entry_id)
        .map_err(|e| format!("Failed to delete history entry: {}", e))
}

pub async fn clear_history(state: &AppState) -> Result<usize, String> {
    state
        .store
        .clear_history()
        .map_err(|e| format!("Failed to clear history: {}", e))
}

pub async fn export_history(state: &AppState, path: PathBuf) -> Result<usize, String> {
    state
        .store
        .export_history(&path, state.config.export_limit)
        .map_err(|e| format!("Failed to export history: {}", e))
}

pub async fn import_history(state: &AppState, path: PathBuf) -> Result<usize, String> {
    state
        .store
        .import_history(&path)
        .map_err(|e| format!("Failed to import history: {}", e))
}
