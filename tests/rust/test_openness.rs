use super::*;
use crate::fixtures::{deeply_nested, nested};

fn store(ids: &[&str]) -> OpennessStore {
    let mut s = OpennessStore::new();
    s.load(ids.iter().map(|id| id.to_string()));
    s
}

// ── Store ────────────────────────────────────────────────────────────────

#[test]
fn test_open_close_toggle() {
    let mut s = OpennessStore::new();
    assert!(!s.is_open("2"));
    assert!(s.open("2"));
    assert!(s.is_open("2"));
    assert!(!s.open("2"));
    assert!(!s.toggle("2"));
    assert!(!s.is_open("2"));
    assert!(s.toggle("2"));
    assert!(s.close("2"));
    assert!(!s.close("2"));
    assert!(s.is_empty());
}

#[test]
fn test_open_then_close_restores_prior_set() {
    let before = store(&["0", "2.1", "1"]);
    let mut s = before.clone();
    s.open("2");
    s.close("2");
    assert_eq!(s, before);
}

#[test]
fn test_toggle_twice_restores_prior_set() {
    let before = store(&["0", "2.1"]);
    let mut s = before.clone();
    s.toggle("0");
    s.toggle("0");
    assert_eq!(s.ids().len(), before.ids().len());
    assert!(s.is_open("0"));
}

#[test]
fn test_load_drops_duplicates() {
    let s = store(&["1", "1", "0.1", "1"]);
    assert_eq!(s.ids(), &["1".to_string(), "0.1".to_string()]);
}

#[test]
fn test_ids_are_distinct_per_depth() {
    let s = store(&["1.2"]);
    assert!(!s.is_open("12"));
    assert!(!s.is_open("1"));
}

// ── Pruning ──────────────────────────────────────────────────────────────

#[test]
fn test_prune_drops_ids_without_chip() {
    let mut s = store(&["0", "1", "2", "0.0", "5", "x", ""]);
    let removed = s.prune(&nested());
    assert_eq!(s.ids(), &["0".to_string(), "2".to_string()]);
    assert_eq!(removed.len(), 5);
}

#[test]
fn test_prune_keeps_ids_under_closed_parents() {
    let mut s = store(&["0.0", "0.2"]);
    let removed = s.prune(&deeply_nested());
    assert!(removed.is_empty());
    assert_eq!(s.len(), 2);
}

// ── Storage ──────────────────────────────────────────────────────────────

#[test]
fn test_memory_storage_roundtrip() {
    let mut storage = MemoryStorage::new();
    let s = store(&["0", "2"]);
    s.flush(&mut storage, OPEN_SUBCOMPONENT_IDS_KEY).unwrap();
    let loaded = OpennessStore::load_from(&storage, OPEN_SUBCOMPONENT_IDS_KEY).unwrap();
    assert_eq!(loaded, s);
}

#[test]
fn test_missing_key_loads_empty() {
    let storage = MemoryStorage::new();
    let loaded = OpennessStore::load_from(&storage, "other").unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn test_json_file_storage_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut storage = JsonFileStorage::new(&path);
    assert_eq!(storage.load(OPEN_SUBCOMPONENT_IDS_KEY).unwrap(), None);

    store(&["2", "2.0"])
        .flush(&mut storage, OPEN_SUBCOMPONENT_IDS_KEY)
        .unwrap();
    let reopened = JsonFileStorage::new(&path);
    let loaded = OpennessStore::load_from(&reopened, OPEN_SUBCOMPONENT_IDS_KEY).unwrap();
    assert_eq!(loaded.ids(), &["2".to_string(), "2.0".to_string()]);
}

#[test]
fn test_json_file_storage_preserves_other_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r##"{ "preferences": { "defaultComponentColor": "#123456" }, "openSubcomponentIds": ["1"] }"##,
    )
    .unwrap();

    let mut storage = JsonFileStorage::new(&path);
    assert_eq!(
        storage.load(OPEN_SUBCOMPONENT_IDS_KEY).unwrap(),
        Some(vec!["1".to_string()])
    );
    storage.save(OPEN_SUBCOMPONENT_IDS_KEY, &["0".to_string()]).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["preferences"]["defaultComponentColor"], "#123456");
    assert_eq!(written[OPEN_SUBCOMPONENT_IDS_KEY][0], "0");
}

#[test]
fn test_json_file_storage_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    let storage = JsonFileStorage::new(&path);
    assert!(matches!(
        storage.load(OPEN_SUBCOMPONENT_IDS_KEY),
        Err(StorageError::Json(_))
    ));
}

#[test]
fn test_storage_accessors() {
    let storage = MemoryStorage::with_ids("k", &["3".to_string()]);
    assert_eq!(storage.get("k"), Some(&["3".to_string()][..]));
    assert_eq!(storage.get("other"), None);
    let file = JsonFileStorage::new("/tmp/settings.json");
    assert_eq!(file.path(), Path::new("/tmp/settings.json"));
}
