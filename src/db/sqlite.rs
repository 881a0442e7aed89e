use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::collections::HashMap;

use crate::models::{Collection, Preference, RequestHistory, SavedRequest};

/// Timestamps are stored as RFC 3339 text with a fixed precision so that
/// text ordering matches chronological ordering.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time truncated to the precision that survives a round trip
/// through the store.
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn parse_timestamp(idx: usize, raw: &str) -> SqliteResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    // Rows filled in by the CURRENT_TIMESTAMP column default
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn get_timestamp(row: &Row, idx: usize) -> SqliteResult<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(idx, &raw)
}

// ==================== Preferences ====================

pub fn get_preference(conn: &Connection, key: &str) -> SqliteResult<Option<Preference>> {
    conn.query_row(
        "SELECT key, value, updated_at FROM preferences WHERE key = ?1",
        [key],
        |row| {
            Ok(Preference {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: get_timestamp(row, 2)?,
            })
        },
    )
    .optional()
}

/// Insert or replace a preference, refreshing its timestamp
pub fn set_preference(conn: &Connection, key: &str, value: &str) -> SqliteResult<()> {
    let now = format_timestamp(&now_timestamp());

    conn.execute(
        r#"
        INSERT INTO preferences (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        (key, value, &now),
    )?;
    Ok(())
}

pub fn get_all_preferences(conn: &Connection) -> SqliteResult<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM preferences")?;

    let prefs = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    prefs.collect()
}

// ==================== Collections ====================

pub fn create_collection(conn: &Connection, name: &str, description: &str) -> SqliteResult<Collection> {
    let now = now_timestamp();

    conn.execute(
        "INSERT INTO collections (name, description, created_at) VALUES (?1, ?2, ?3)",
        (name, description, format_timestamp(&now)),
    )?;

    Ok(Collection {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
        created_at: now,
    })
}

/// Load all collections ordered by name
pub fn list_collections(conn: &Connection) -> SqliteResult<Vec<Collection>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at FROM collections ORDER BY name",
    )?;

    let collections = stmt.query_map([], |row| {
        Ok(Collection {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            created_at: get_timestamp(row, 3)?,
        })
    })?;

    collections.collect()
}

/// Delete a collection. Its saved requests go with it and history rows
/// pointing at it are detached (both enforced by the schema).
pub fn delete_collection(conn: &Connection, collection_id: i64) -> SqliteResult<bool> {
    let rows_affected = conn.execute("DELETE FROM collections WHERE id = ?1", [collection_id])?;
    Ok(rows_affected > 0)
}

pub fn collection_exists(conn: &Connection, collection_id: i64) -> SqliteResult<bool> {
    conn.query_row("SELECT 1 FROM collections WHERE id = ?1", [collection_id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
}

// ==================== Request History ====================

const HISTORY_COLUMNS: &str = "id, url, method, headers, body, timestamp, \
     response_status, response_body, response_headers, \
     response_time_ms, response_size, is_favorite, collection_id";

fn history_from_row(row: &Row) -> SqliteResult<RequestHistory> {
    Ok(RequestHistory {
        id: row.get(0)?,
        url: row.get(1)?,
        method: row.get(2)?,
        headers: row.get(3)?,
        body: row.get(4)?,
        timestamp: get_timestamp(row, 5)?,
        response_status: row.get(6)?,
        response_body: row.get(7)?,
        response_headers: row.get(8)?,
        response_time_ms: row.get::<_, Option<i64>>(9)?.unwrap_or(0),
        response_size: row.get::<_, Option<i64>>(10)?.unwrap_or(0),
        is_favorite: row.get::<_, Option<bool>>(11)?.unwrap_or(false),
        collection_id: row.get(12)?,
    })
}

/// Insert a history row and return its new id. The entry's own `id` is ignored.
pub fn insert_history(conn: &Connection, entry: &RequestHistory) -> SqliteResult<i64> {
    conn.execute(
        r#"
        INSERT INTO request_history (
            url, method, headers, body, timestamp,
            response_status, response_body, response_headers,
            response_time_ms, response_size, is_favorite, collection_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
        params![
            &entry.url,
            &entry.method,
            &entry.headers,
            &entry.body,
            format_timestamp(&entry.timestamp),
            &entry.response_status,
            &entry.response_body,
            &entry.response_headers,
            entry.response_time_ms,
            entry.response_size,
            entry.is_favorite,
            entry.collection_id,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Persist a history entry and write the assigned id back into it
pub fn save_history(conn: &Connection, entry: &mut RequestHistory) -> SqliteResult<i64> {
    let id = insert_history(conn, entry)?;
    entry.id = id;
    Ok(id)
}

/// Load a page of history, newest first
pub fn list_history(conn: &Connection, limit: i64, offset: i64) -> SqliteResult<Vec<RequestHistory>> {
    let sql = format!(
        "SELECT {} FROM request_history ORDER BY timestamp DESC, id DESC LIMIT ?1 OFFSET ?2",
        HISTORY_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let entries = stmt.query_map([limit, offset], history_from_row)?;

    entries.collect()
}

/// Case-sensitive substring search over URL, method and response status.
/// An empty term behaves like an unfiltered listing.
pub fn search_history(conn: &Connection, term: &str, limit: i64) -> SqliteResult<Vec<RequestHistory>> {
    if term.is_empty() {
        return list_history(conn, limit, 0);
    }

    // instr() compares bytes, unlike LIKE which folds ASCII case and
    // treats % and _ as wildcards.
    let sql = format!(
        r#"
        SELECT {} FROM request_history
        WHERE instr(url, ?1) > 0
           OR instr(method, ?1) > 0
           OR instr(COALESCE(response_status, ''), ?1) > 0
        ORDER BY timestamp DESC, id DESC
        LIMIT ?2
        "#,
        HISTORY_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;

    let entries = stmt.query_map(params![term, limit], history_from_row)?;

    entries.collect()
}

pub fn delete_history(conn: &Connection, entry_id: i64) -> SqliteResult<bool> {
    let rows_affected = conn.execute("DELETE FROM request_history WHERE id = ?1", [entry_id])?;
    Ok(rows_affected > 0)
}

/// Remove every history row, returning how many were deleted
pub fn clear_history(conn: &Connection) -> SqliteResult<usize> {
    conn.execute("DELETE FROM request_history", [])
}

// ==================== Saved Requests ====================

const SAVED_REQUEST_COLUMNS: &str = "id, name, url, method, headers, body, collection_id, created_at";

fn saved_request_from_row(row: &Row) -> SqliteResult<SavedRequest> {
    Ok(SavedRequest {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        method: row.get(3)?,
        headers: row.get(4)?,
        body: row.get(5)?,
        collection_id: row.get(6)?,
        created_at: get_timestamp(row, 7)?,
    })
}

/// Persist a saved request, assigning its id and creation time
pub fn save_request(conn: &Connection, request: &mut SavedRequest) -> SqliteResult<i64> {
    let now = now_timestamp();

    conn.execute(
        r#"
        INSERT INTO saved_requests (name, url, method, headers, body, collection_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            &request.name,
            &request.url,
            &request.method,
            &request.headers,
            &request.body,
            request.collection_id,
            format_timestamp(&now),
        ],
    )?;

    request.id = conn.last_insert_rowid();
    request.created_at = now;
    Ok(request.id)
}

/// Saved requests in a collection ordered by name. `None` selects the
/// requests that belong to no collection.
pub fn list_saved_requests(conn: &Connection, collection_id: Option<i64>) -> SqliteResult<Vec<SavedRequest>> {
    match collection_id {
        Some(id) => {
            let sql = format!(
                "SELECT {} FROM saved_requests WHERE collection_id = ?1 ORDER BY name",
                SAVED_REQUEST_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let requests = stmt.query_map([id], saved_request_from_row)?;
            requests.collect()
        }
        None => {
            let sql = format!(
                "SELECT {} FROM saved_requests WHERE collection_id IS NULL ORDER BY name",
                SAVED_REQUEST_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let requests = stmt.query_map([], saved_request_from_row)?;
            requests.collect()
        }
    }
}

pub fn get_saved_request(conn: &Connection, request_id: i64) -> SqliteResult<Option<SavedRequest>> {
    let sql = format!("SELECT {} FROM saved_requests WHERE id = ?1", SAVED_REQUEST_COLUMNS);

    conn.query_row(&sql, [request_id], saved_request_from_row).optional()
}

pub fn delete_saved_request(conn: &Connection, request_id: i64) -> SqliteResult<bool> {
    let rows_affected = conn.execute("DELETE FROM saved_requests WHERE id = ?1", [request_id])?;
    Ok(rows_affected > 0)
}
