use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use crate::db::{schema, sqlite};
use crate::error::{StoreError, StoreResult};
use crate::models::{Collection, Preference, RequestHistory, SavedRequest};

pub const DATABASE_FILE: &str = "golem.db";

/// Handle to the local database.
///
/// One connection shared behind a mutex; every operation holds the lock
/// for its whole duration so driver calls never interleave.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) `golem.db` inside `data_dir` and ensure the schema.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        Self::open_path(&data_dir.join(DATABASE_FILE))
    }

    pub fn open_path(db_path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(db_path)?;
        log::info!("Opened database at {}", db_path.display());
        Self::from_connection(conn)
    }

    /// Fresh in-memory store, used by tests.
    pub fn in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        // Cascade and SET NULL rules are only honoured with this enabled
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::ensure_schema(&conn)?;

        Ok(Store {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&conn)
    }

    /// Like [`Store::with_conn`] but with a mutable connection, needed to
    /// open transactions.
    pub fn with_conn_mut<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T>,
    {
        let mut conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut conn)
    }

    /// Close the underlying connection, reporting any error SQLite raises.
    pub fn close(self) -> StoreResult<()> {
        let conn = self.conn.into_inner().map_err(|_| StoreError::LockPoisoned)?;
        conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }

    // ==================== Preferences ====================

    pub fn get_preference(&self, key: &str) -> StoreResult<Option<Preference>> {
        self.with_conn(|conn| Ok(sqlite::get_preference(conn, key)?))
    }

    pub fn set_preference(&self, key: &str, value: &str) -> StoreResult<()> {
        self.with_conn(|conn| Ok(sqlite::set_preference(conn, key, value)?))
    }

    /// Upsert several preferences under a single lock acquisition.
    pub fn set_preferences<K, V>(&self, pairs: &[(K, V)]) -> StoreResult<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.with_conn(|conn| {
            for (key, value) in pairs {
                sqlite::set_preference(conn, key.as_ref(), value.as_ref())?;
            }
            Ok(())
        })
    }

    pub fn get_all_preferences(&self) -> StoreResult<HashMap<String, String>> {
        self.with_conn(|conn| Ok(sqlite::get_all_preferences(conn)?))
    }

    // ==================== Collections ====================

    pub fn create_collection(&self, name: &str, description: &str) -> StoreResult<Collection> {
        self.with_conn(|conn| Ok(sqlite::create_collection(conn, name, description)?))
    }

    pub fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        self.with_conn(|conn| Ok(sqlite::list_collections(conn)?))
    }

    pub fn delete_collection(&self, collection_id: i64) -> StoreResult<bool> {
        self.with_conn(|conn| Ok(sqlite::delete_collection(conn, collection_id)?))
    }

    // ==================== Request History ====================

    pub fn save_history(&self, entry: &mut RequestHistory) -> StoreResult<i64> {
        self.with_conn(|conn| Ok(sqlite::save_history(conn, entry)?))
    }

    pub fn list_history(&self, limit: i64, offset: i64) -> StoreResult<Vec<RequestHistory>> {
        self.with_conn(|conn| Ok(sqlite::list_history(conn, limit, offset)?))
    }

    pub fn search_history(&self, term: &str, limit: i64) -> StoreResult<Vec<RequestHistory>> {
        self.with_conn(|conn| Ok(sqlite::search_history(conn, term, limit)?))
    }

    pub fn delete_history(&self, entry_id: i64) -> StoreResult<bool> {
        self.with_conn(|conn| Ok(sqlite::delete_history(conn, entry_id)?))
    }

    pub fn clear_history(&self) -> StoreResult<usize> {
        self.with_conn(|conn| Ok(sqlite::clear_history(conn)?))
    }

    // ==================== Saved Requests ====================

    pub fn save_request(&self, request: &mut SavedRequest) -> StoreResult<i64> {
        self.with_conn(|conn| Ok(sqlite::save_request(conn, request)?))
    }

    pub fn list_saved_requests(&self, collection_id: Option<i64>) -> StoreResult<Vec<SavedRequest>> {
        self.with_conn(|conn| Ok(sqlite::list_saved_requests(conn, collection_id)?))
    }

    /// Fetch one saved request; a missing id is [`StoreError::NotFound`].
    pub fn get_saved_request(&self, request_id: i64) -> StoreResult<SavedRequest> {
        self.with_conn(|conn| {
            sqlite::get_saved_request(conn, request_id)?.ok_or(StoreError::NotFound {
                entity: "saved request",
                id: request_id,
            })
        })
    }

    pub fn delete_saved_request(&self, request_id: i64) -> StoreResult<bool> {
        self.with_conn(|conn| Ok(sqlite::delete_saved_request(conn, request_id)?))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_has_schema() {
        let store = Store::in_memory().unwrap();
        let count: i64 = store
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM request_history", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let store = Store::in_memory().unwrap();
        let enabled: i64 = store
            .with_conn(|conn| Ok(conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join(".golem");

        let store = Store::open(&data_dir).unwrap();
        store.set_preference("last_url", "https://api.test").unwrap();
        store.close().unwrap();

        assert!(data_dir.join(DATABASE_FILE).exists());

        let reopened = Store::open(&data_dir).unwrap();
        let pref = reopened.get_preference("last_url").unwrap().unwrap();
        assert_eq!(pref.value, "https://api.test");
    }

    #[test]
    fn test_get_missing_saved_request_is_not_found() {
        let store = Store::in_memory().unwrap();
        let err = store.get_saved_request(7).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "saved request 7 not found");
    }

    #[test]
    fn test_set_preferences_batch() {
        let store = Store::in_memory().unwrap();
        store
            .set_preferences(&[("window_width", "800"), ("window_height", "600")])
            .unwrap();

        let all = store.get_all_preferences().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["window_height"], "600");
    }

    #[test]
    fn test_open_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        assert!(Store::open(&blocker).is_err());
    }
}
