use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KEY_WINDOW_WIDTH: &str = "window_width";
pub const KEY_WINDOW_HEIGHT: &str = "window_height";
pub const KEY_LAST_URL: &str = "last_url";
pub const KEY_LAST_METHOD: &str = "last_method";

/// Typed view over the key/value preference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreferences {
    pub window_width: f32,
    pub window_height: f32,
    pub last_url: String,
    pub last_method: String,
}

impl Default for AppPreferences {
    fn default() -> Self {
        AppPreferences {
            window_width: 800.0,
            window_height: 600.0,
            last_url: String::new(),
            last_method: "GET".to_string(),
        }
    }
}

impl AppPreferences {
    /// Build from stored preferences. Missing or unparsable values keep
    /// their defaults.
    pub fn from_map(prefs: &HashMap<String, String>) -> Self {
        let mut result = AppPreferences::default();

        if let Some(w) = prefs.get(KEY_WINDOW_WIDTH).and_then(|v| v.parse().ok()) {
            result.window_width = w;
        }
        if let Some(h) = prefs.get(KEY_WINDOW_HEIGHT).and_then(|v| v.parse().ok()) {
            result.window_height = h;
        }
        if let Some(url) = prefs.get(KEY_LAST_URL) {
            result.last_url = url.clone();
        }
        if let Some(method) = prefs.get(KEY_LAST_METHOD).filter(|m| !m.is_empty()) {
            result.last_method = method.clone();
        }

        result
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (KEY_WINDOW_WIDTH, format!("{:.6}", self.window_width)),
            (KEY_WINDOW_HEIGHT, format!("{:.6}", self.window_height)),
            (KEY_LAST_URL, self.last_url.clone()),
            (KEY_LAST_METHOD, self.last_method.clone()),
        ]
    }
}
