use super::*;

#[test]
fn memory_store_set_get_remove() {
    let mut s = MemoryStore::new();
    assert!(s.is_empty());
    s.set(SETTINGS_KEY, "{}").unwrap();
    assert_eq!(s.get(SETTINGS_KEY).unwrap().as_deref(), Some("{}"));
    assert_eq!(s.len(), 1);
    s.remove(SETTINGS_KEY).unwrap();
    s.remove(SETTINGS_KEY).unwrap();
    assert_eq!(s.get(SETTINGS_KEY).unwrap(), None);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("state");

    let mut a = FileStore::new(&root);
    assert_eq!(a.get(PRESETS_KEY).unwrap(), None);
    a.set(PRESETS_KEY, "[]").unwrap();

    let b = FileStore::new(&root);
    assert_eq!(b.get(PRESETS_KEY).unwrap().as_deref(), Some("[]"));
    assert!(root.join("presets.json").exists());
    assert!(!root.join("presets.json.tmp").exists());
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = FileStore::new(dir.path());
    s.set(THEME_KEY, "\"dark\"").unwrap();
    s.remove(THEME_KEY).unwrap();
    s.remove(THEME_KEY).unwrap();
    assert_eq!(s.get(THEME_KEY).unwrap(), None);
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = FileStore::new(dir.path());
    assert!(s.set("../escape", "x").is_err());
    assert!(s.get("").is_err());
}

#[test]
fn best_effort_read_swallows_errors() {
    let dir = tempfile::tempdir().unwrap();
    let s = FileStore::new(dir.path());
    assert_eq!(read_best_effort(&s, "bad/key"), None);
}

#[test]
fn file_store_write_failures_are_storage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let occupied = dir.path().join("occupied");
    std::fs::write(&occupied, "not a directory").unwrap();

    let mut s = FileStore::new(occupied.join("state"));
    let err = s.set(SETTINGS_KEY, "{}").unwrap_err();
    assert!(matches!(err, DriftError::Storage(_)), "{err:?}");
    assert!(err.to_string().starts_with("storage error:"), "{err}");
    assert!(!err.is_fatal());
}
