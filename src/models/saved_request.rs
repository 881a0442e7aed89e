use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRequest {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the user when saving a request template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSavedRequest {
    pub name: String,
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub collection_id: Option<i64>,
}

impl SavedRequest {
    /// An unsaved template; the store assigns `id` and `created_at`.
    pub fn from_create(create: CreateSavedRequest) -> Self {
        SavedRequest {
            id: 0,
            name: create.name,
            url: create.url,
            method: create.method,
            headers: create.headers,
            body: create.body,
            collection_id: create.collection_id,
            created_at: Utc::now(),
        }
    }
}
