use std::collections::HashMap;

use crate::models::{AppPreferences, Preference};
use crate::state::AppState;

pub async fn get_preference(state: &AppState, key: String) -> Result<Option<Preference>, String> {
    state
        .store
        .get_preference(&key)
        .map_err(|e| format!("Failed to load preference: {}", e))
}

pub async fn set_preference(state: &AppState, key: String, value: String) -> Result<(), String> {
    state
        .store
        .set_preference(&key, &value)
        .map_err(|e| format!("Failed to save preference: {}", e))
}

pub async fn load_preferences(state: &AppState) -> Result<HashMap<String, String>, String> {
    state
        .store
        .get_all_preferences()
        .map_err(|e| format!("Failed to load preferences: {}", e))
}

/// Typed preferences. A read failure is logged and the defaults are used so
/// the application can still open.
pub async fn load_app_preferences(state: &AppState) -> AppPreferences {
    match state.store.get_all_preferences() {
        Ok(prefs) => AppPreferences::from_map(&prefs),
        Err(e) => {
            log::warn!("Error loading preferences: {}", e);
            AppPreferences::default()
        }
    }
}

pub async fn save_app_preferences(state: &AppState, prefs: AppPreferences) -> Result<(), String> {
    state
        .store
        .set_preferences(&prefs.to_pairs())
        .map_err(|e| format!("Failed to save preferences: {}", e))
}
