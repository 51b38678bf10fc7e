use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hydraulics_toolbox::history::RecordStore;
use serde_json::json;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn missing_file_is_empty_store() {
    let dir = unique_temp_dir("hydraulics_history_empty");
    let store = RecordStore::history(&dir);
    assert!(store.list().expect("list").is_empty());
    assert!(!store.delete(1).expect("delete"));
    assert!(!dir.exists());
}

#[test]
fn append_list_delete() {
    let dir = unique_temp_dir("hydraulics_history_ops");
    let store = RecordStore::history(&dir);

    let first = store
        .append("continuity", &json!({"A1": "2", "V1": "3"}), "V2=6")
        .expect("append");
    let second = store
        .append("bernoulli", &json!({"P1": "200000"}), "P2=184190")
        .expect("append");
    let third = store
        .append("bernoulli-losses", &json!({"hL": "2"}), "P2=164570")
        .expect("append");
    assert_eq!((first.id, second.id, third.id), (1, 2, 3));
    assert!(store.path().ends_with("history.jsonl"));

    let all = store.list().expect("list");
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(all[2].result, "V2=6");
    let inputs: serde_json::Value = serde_json::from_str(&all[2].inputs).expect("inputs json");
    assert_eq!(inputs["V1"], "3");

    let bernoulli = store.list_by_type_prefix("bernoulli").expect("prefix");
    assert_eq!(bernoulli.len(), 2);

    assert!(store.delete(2).expect("delete"));
    assert!(!store.delete(2).expect("delete again"));
    assert_eq!(store.list().expect("list").len(), 2);

    // 삭제 후에도 id 는 재사용하지 않는다.
    let fourth = store.append("reynolds", &json!({}), "Re=100000").expect("append");
    assert_eq!(fourth.id, 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn prefix_delete_and_clear() {
    let dir = unique_temp_dir("hydraulics_history_clear");
    let store = RecordStore::favorites(&dir);
    for kind in ["bernoulli", "bernoulli-cavitation", "froude"] {
        store.append(kind, &json!({}), "x=1").expect("append");
    }
    assert!(store.path().ends_with("favorites.jsonl"));

    assert_eq!(store.delete_by_type_prefix("bernoulli").expect("prefix delete"), 2);
    let left = store.list().expect("list");
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].calculation_type, "froude");

    store.clear().expect("clear");
    assert!(store.list().expect("list").is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_line_is_reported() {
    let dir = unique_temp_dir("hydraulics_history_corrupt");
    fs::create_dir_all(&dir).expect("dir");
    let store = RecordStore::history(&dir);
    fs::write(store.path(), "not json\n").expect("write");
    assert!(store.list().is_err());
    let _ = fs::remove_dir_all(&dir);
}
