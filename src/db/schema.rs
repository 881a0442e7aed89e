use rusqlite::{Connection, Result as SqliteResult};

/// Create tables and indexes if they don't exist. Safe to call on every
/// startup; existing data is never dropped or altered.
pub fn ensure_schema(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        r#"
        -- Key/value application settings
        CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT DEFAULT CURRENT_TIMESTAMP
        );

        -- Named groups of saved requests
        CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );

        -- Every executed request and its outcome
        CREATE TABLE IF NOT EXISTS request_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL,
            method TEXT NOT NULL,
            headers TEXT,
            body TEXT,
            timestamp TEXT DEFAULT CURRENT_TIMESTAMP,
            response_status TEXT,
            response_body TEXT,
            response_headers TEXT,
            response_time_ms INTEGER,
            response_size INTEGER,
            is_favorite INTEGER DEFAULT 0,
            collection_id INTEGER,
            FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE SET NULL
        );

        -- Reusable request templates
        CREATE TABLE IF NOT EXISTS saved_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            url TEXT NOT NULL,
            method TEXT NOT NULL,
            headers TEXT,
            body TEXT,
            collection_id INTEGER,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_request_history_timestamp ON request_history(timestamp DESC);
        CREATE INDEX IF NOT EXISTS idx_request_history_url ON request_history(url);
        CREATE INDEX IF NOT EXISTS idx_request_history_method ON request_history(method);
        CREATE INDEX IF NOT EXISTS idx_saved_requests_collection ON saved_requests(collection_id);
        "#,
    )
}
