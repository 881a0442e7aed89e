use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named grouping of saved requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}
