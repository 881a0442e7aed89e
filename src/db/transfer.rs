//! History export/import as an indented JSON array.

use std::path::Path;

use crate::db::sqlite;
use crate::db::store::Store;
use crate::error::StoreResult;
use crate::models::RequestHistory;

/// Most rows written by a single export.
pub const EXPORT_LIMIT: i64 = 10_000;

impl Store {
    /// Write up to `limit` of the most recent history rows to `path`.
    /// Returns the number of rows written.
    pub fn export_history(&self, path: &Path, limit: i64) -> StoreResult<usize> {
        let history = self.list_history(limit, 0)?;
        let data = serde_json::to_string_pretty(&history)?;
        std::fs::write(path, data)?;

        log::info!("Exported {} history entries to {}", history.len(), path.display());
        Ok(history.len())
    }

    /// Insert every row from a JSON export in one transaction. Nothing is
    /// kept unless all rows go in. Imported rows receive new ids, and a
    /// `collection_id` naming no collection in this store is cleared.
    pub fn import_history(&self, path: &Path) -> StoreResult<usize> {
        let data = std::fs::read_to_string(path)?;
        let mut history: Vec<RequestHistory> = serde_json::from_str(&data)?;

        self.with_conn_mut(|conn| {
            // Dropping an uncommitted transaction rolls it back
            let tx = conn.transaction()?;
            for entry in &mut history {
                if let Some(collection_id) = entry.collection_id {
                    if !sqlite::collection_exists(&tx, collection_id)? {
                        log::debug!("Detaching imported entry from missing collection {}", collection_id);
                        entry.collection_id = None;
                    }
                }
                sqlite::insert_history(&tx, entry)?;
            }
            tx.commit()?;
            Ok(())
        })?;

        log::info!("Imported {} history entries from {}", history.len(), path.display());
        Ok(history.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::{Duration, TimeZone, Utc};

    fn seeded_store(n: i64) -> Store {
        let store = Store::in_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        for i in 0..n {
            let mut entry = RequestHistory::new("GET", format!("https://api.test/items/{}", i));
            entry.timestamp = base + Duration::seconds(i);
            entry.response_status = Some("200 OK".to_string());
            entry.response_time_ms = 10 + i;
            store.save_history(&mut entry).unwrap();
        }
        store
    }

    #[test]
    fn test_export_writes_newest_first() {
        let store = seeded_store(3);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        assert_eq!(store.export_history(&path, EXPORT_LIMIT).unwrap(), 3);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"), "export should be indented");
        let parsed: Vec<RequestHistory> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0].url, "https://api.test/items/2");
    }

    #[test]
    fn test_export_respects_limit() {
        let store = seeded_store(5);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        assert_eq!(store.export_history(&path, 2).unwrap(), 2);
    }

    #[test]
    fn test_import_rolls_back_on_failed_insert() {
        let source = seeded_store(10);
        let rows = source.list_history(100, 0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();

        let target = Store::in_memory().unwrap();
        // Fail the insert of the fifth row in file order
        let rejected = rows[4].url.clone();
        target
            .with_conn(|conn| {
                conn.execute_batch(&format!(
                    "CREATE TRIGGER reject_row BEFORE INSERT ON request_history \
                     WHEN NEW.url = '{}' BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                    rejected
                ))?;
                Ok(())
            })
            .unwrap();

        let err = target.import_history(&path).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
        assert!(target.list_history(100, 0).unwrap().is_empty());
    }

    #[test]
    fn test_import_detaches_missing_collections() {
        let source = Store::in_memory().unwrap();
        let users = source.create_collection("Users", "").unwrap();
        let mut linked = RequestHistory::new("GET", "https://api.test/users");
        linked.collection_id = Some(users.id);
        source.save_history(&mut linked).unwrap();
        source
            .save_history(&mut RequestHistory::new("GET", "https://api.test/health"))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        source.export_history(&path, EXPORT_LIMIT).unwrap();

        let target = Store::in_memory().unwrap();
        assert_eq!(target.import_history(&path).unwrap(), 2);

        let imported = target.list_history(100, 0).unwrap();
        assert_eq!(imported.len(), 2);
        assert!(imported.iter().all(|e| e.collection_id.is_none()));
    }

    #[test]
    fn test_import_keeps_existing_collection_links() {
        let store = Store::in_memory().unwrap();
        let users = store.create_collection("Users", "").unwrap();
        let mut linked = RequestHistory::new("GET", "https://api.test/users");
        linked.collection_id = Some(users.id);
        store.save_history(&mut linked).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        store.export_history(&path, EXPORT_LIMIT).unwrap();

        assert_eq!(store.import_history(&path).unwrap(), 1);
        let history = store.list_history(100, 0).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|e| e.collection_id == Some(users.id)));
    }

    #[test]
    fn test_import_missing_file() {
        let store = Store::in_memory().unwrap();
        let err = store.import_history(Path::new("/nonexistent/history.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
