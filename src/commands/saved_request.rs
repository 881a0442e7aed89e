use crate::models::{CreateSavedRequest, SavedRequest};
use crate::state::AppState;

pub async fn create_saved_request(
    state: &AppState,
    request: CreateSavedRequest,
) -> Result<SavedRequest, String> {
    let mut saved = SavedRequest::from_create(request);

    state
        .store
        .save_request(&mut saved)
        .map_err(|e| format!("Failed to create saved request: {}", e))?;

    Ok(saved)
}

/// Saved requests in a collection, or the unassigned ones when `collection_id` is `None`
pub async fn load_saved_requests(
    state: &AppState,
    collection_id: Option<i64>,
) -> Result<Vec<SavedRequest>, String> {
    state
        .store
        .list_saved_requests(collection_id)
        .map_err(|e| format!("Failed to load saved requests: {}", e))
}

pub async fn get_saved_request(state: &AppState, request_id: i64) -> Result<SavedRequest, String> {
    state
        .store
        .get_saved_request(request_id)
        .map_err(|e| format!("Failed to get saved request: {}", e))
}

pub async fn delete_saved_request(state: &AppState, request_id: i64) -> Result<bool, String> {
    state
        .store
        .delete_saved_request(request_id)
        .map_err(|e| format!("Failed to delete saved request: {}", e))
}
