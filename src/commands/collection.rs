use crate::models::Collection;
use crate::state::AppState;

pub async fn create_collection(
    state: &AppState,
    name: String,
    description: String,
) -> Result<Collection, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Collection name cannot be empty".to_string());
    }

    state
        .store
        .create_collection(name, &description)
        .map_err(|e| format!("Failed to create collection: {}", e))
}

pub async fn load_collections(state: &AppState) -> Result<Vec<Collection>, String> {
    state
        .store
        .list_collections()
        .map_err(|e| format!("Failed to load collections: {}", e))
}

/// Delete a collection together with its saved requests
pub async fn delete_collection(state: &AppState, collection_id: i64) -> Result<bool, String> {
    state
        .store
        .delete_collection(collection_id)
        .map_err(|e| format!("Failed to delete collection: {}", e))
}
