use super::*;
use crate::test_helpers::FailingBackend;
use std::sync::atomic::{AtomicUsize, Ordering};

fn temp_prefs_path() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("badwords-prefs-{}-{n}", std::process::id())).join("prefs.json")
}

// =============================================================
// PreferenceStore
// =============================================================

#[test]
fn empty_store_reads_none() {
    let store = PreferenceStore::in_memory();
    assert_eq!(store.get(THEME_KEY), None);
    assert_eq!(store.get(CONSENT_KEY), None);
}

#[test]
fn set_then_get() {
    let store = PreferenceStore::in_memory();
    store.set(THEME_KEY, "light");
    assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
}

#[test]
fn clones_share_values() {
    let store = PreferenceStore::in_memory();
    let other = store.clone();
    store.set(CONSENT_KEY, "true");
    assert_eq!(other.get(CONSENT_KEY).as_deref(), Some("true"));
}

#[test]
fn failing_backend_reads_none() {
    let store = PreferenceStore::new(FailingBackend);
    assert_eq!(store.get(THEME_KEY), None);
}

#[test]
fn failing_backend_write_holds_for_session() {
    let store = PreferenceStore::new(FailingBackend);
    store.set(CONSENT_KEY, "true");
    assert_eq!(store.get(CONSENT_KEY).as_deref(), Some("true"));
}

// =============================================================
// FileBackend
// =============================================================

#[test]
fn file_backend_missing_file_is_empty() {
    let backend = FileBackend::new(temp_prefs_path());
    assert!(backend.get(THEME_KEY).unwrap().is_none());
}

#[test]
fn file_backend_survives_reload() {
    let path = temp_prefs_path();
    {
        let store = PreferenceStore::new(FileBackend::new(&path));
        store.set(THEME_KEY, "light");
        store.set(CONSENT_KEY, "true");
    }

    let reloaded = PreferenceStore::new(FileBackend::new(&path));
    assert_eq!(reloaded.get(THEME_KEY).as_deref(), Some("light"));
    assert_eq!(reloaded.get(CONSENT_KEY).as_deref(), Some("true"));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn file_backend_corrupt_file_is_an_error() {
    let path = temp_prefs_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{not json").unwrap();

    let backend = FileBackend::new(&path);
    assert!(matches!(backend.get(THEME_KEY), Err(StoreError::Serialize(_))));

    let store = PreferenceStore::new(FileBackend::new(&path));
    assert_eq!(store.get(THEME_KEY), None);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
