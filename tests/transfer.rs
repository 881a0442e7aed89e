use chrono::{Duration, TimeZone, Utc};
use golem_lib::db::transfer::EXPORT_LIMIT;
use golem_lib::models::RequestHistory;
use golem_lib::Store;

fn sample_entry(i: i64) -> RequestHistory {
    let mut entry = RequestHistory::new(if i % 2 == 0 { "GET" } else { "POST" }, format!("https://api.test/r/{}", i));
    entry.timestamp = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap() + Duration::seconds(i);
    entry.response_status = Some(if i % 3 == 0 { "Error".to_string() } else { "200 OK".to_string() });
    entry.response_body = (i % 3 != 0).then(|| format!("{{\"n\":{}}}", i));
    entry.response_time_ms = 5 * i;
    entry.response_size = i;
    entry.is_favorite = i == 4;
    entry
}

/// Compare everything but the store-assigned id
fn without_ids(mut rows: Vec<RequestHistory>) -> Vec<RequestHistory> {
    for row in &mut rows {
        row.id = 0;
    }
    rows
}

#[test]
fn test_export_then_import_reproduces_rows() {
    let dir = tempfile::tempdir().unwrap();
    let source = Store::open(&dir.path().join("source")).unwrap();
    for i in 0..12 {
        source.save_history(&mut sample_entry(i)).unwrap();
    }
    let file = dir.path().join("history.json");

    assert_eq!(source.export_history(&file, EXPORT_LIMIT).unwrap(), 12);

    let target = Store::open(&dir.path().join("target")).unwrap();
    assert_eq!(target.import_history(&file).unwrap(), 12);

    assert_eq!(
        without_ids(target.list_history(100, 0).unwrap()),
        without_ids(source.list_history(100, 0).unwrap())
    );
}

#[test]
fn test_malformed_fifth_row_imports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows: Vec<serde_json::Value> = (0..10)
        .map(|i| serde_json::to_value(sample_entry(i)).unwrap())
        .collect();
    rows[4] = serde_json::json!({ "method": "GET", "timestamp": "not a timestamp" });
    let file = dir.path().join("broken.json");
    std::fs::write(&file, serde_json::to_string_pretty(&rows).unwrap()).unwrap();

    let store = Store::open(&dir.path().join("data")).unwrap();
    store.save_history(&mut sample_entry(99)).unwrap();

    assert!(store.import_history(&file).is_err());
    assert_eq!(store.list_history(100, 0).unwrap().len(), 1);
}

#[test]
fn test_import_appends_with_new_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let mut existing = sample_entry(1);
    store.save_history(&mut existing).unwrap();

    let file = dir.path().join("one.json");
    store.export_history(&file, EXPORT_LIMIT).unwrap();
    store.import_history(&file).unwrap();

    let rows = store.list_history(10, 0).unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
    assert_eq!(rows[0].url, rows[1].url);
}
