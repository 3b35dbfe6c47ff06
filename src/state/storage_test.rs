use super::*;

// =============================================================================
// MemoryStorage
// =============================================================================

#[test]
fn memory_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("token"), None);
    storage.set("token", "abc").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("abc"));
    storage.remove("token").unwrap();
    assert_eq!(storage.get("token"), None);
}

#[test]
fn memory_with_entries_seeds_values() {
    let storage = MemoryStorage::with_entries([("token", "t"), ("user", "{}")]);
    assert_eq!(storage.get("token").as_deref(), Some("t"));
    assert_eq!(storage.get("user").as_deref(), Some("{}"));
}

#[test]
fn memory_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove("nope").is_ok());
}

#[test]
fn memory_replace_sets_and_removes_together() {
    let storage = MemoryStorage::with_entries([("token", "old"), ("stale", "x")]);
    storage.replace(&[("token", "new"), ("user", "{}")], &["stale"]).unwrap();
    assert_eq!(storage.get_many(&["token", "user", "stale"]), vec![
        Some("new".to_owned()),
        Some("{}".to_owned()),
        None
    ]);
}

// =============================================================================
// FileStorage
// =============================================================================

#[test]
fn file_missing_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("session.json"));
    assert_eq!(storage.get("token"), None);
}

#[test]
fn file_set_creates_parent_dirs_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");
    let storage = FileStorage::new(&path);
    storage.set("token", "abc").unwrap();
    assert!(path.exists());

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get("token").as_deref(), Some("abc"));
}

#[test]
fn file_keeps_other_keys_on_update() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("s.json"));
    storage.set("token", "abc").unwrap();
    storage.set("user", "{\"id\":1}").unwrap();
    storage.remove("token").unwrap();
    assert_eq!(storage.get("token"), None);
    assert_eq!(storage.get("user").as_deref(), Some("{\"id\":1}"));
}

#[test]
fn file_corrupt_contents_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::write(&path, "not json at all").unwrap();
    let storage = FileStorage::new(&path);
    assert_eq!(storage.get("token"), None);

    storage.set("token", "fresh").unwrap();
    assert_eq!(storage.get("token").as_deref(), Some("fresh"));
}

#[test]
fn file_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    FileStorage::new(&path).set("k", "v").unwrap();
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn file_write_into_a_file_parent_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let storage = FileStorage::new(blocker.join("s.json"));
    assert!(matches!(storage.set("k", "v"), Err(StorageError::Io { .. })));
}

#[test]
fn file_replace_lands_in_one_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    let storage = FileStorage::new(&path);
    storage.replace(&[("token", "t1"), ("user", "{\"id\":1}")], &[]).unwrap();

    std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
    let err = storage.replace(&[("token", "t2"), ("user", "{\"id\":2}")], &[]);
    assert!(matches!(err, Err(StorageError::Io { .. })));
    assert_eq!(storage.get_many(&["token", "user"]), vec![Some("t1".to_owned()), Some("{\"id\":1}".to_owned())]);
}

#[test]
fn file_replace_removes_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("s.json"));
    storage.replace(&[("token", "t"), ("user", "u")], &[]).unwrap();
    storage.replace(&[], &["token", "user"]).unwrap();
    assert_eq!(storage.get_many(&["token", "user"]), vec![None, None]);
}

#[test]
fn file_unreadable_path_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.json");
    std::fs::create_dir(&path).unwrap();
    let storage = FileStorage::new(&path);
    assert_eq!(storage.get("token"), None);
    assert_eq!(storage.get_many(&["token", "user"]), vec![None, None]);
}
