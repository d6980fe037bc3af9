use super::*;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK`.
unsafe fn clear_badwords_env() {
    unsafe {
        std::env::remove_var("BADWORDS_API_BASE");
        std::env::remove_var("BADWORDS_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("BADWORDS_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("BADWORDS_PREFS_PATH");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe { clear_badwords_env() };

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.api_base, DEFAULT_API_BASE);
    assert_eq!(
        cfg.timeouts,
        Timeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
    assert!(cfg.prefs_path.is_none());
}

#[test]
fn from_env_overrides_and_trims_base() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        clear_badwords_env();
        std::env::set_var("BADWORDS_API_BASE", "http://localhost:8000/");
        std::env::set_var("BADWORDS_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("BADWORDS_CONNECT_TIMEOUT_SECS", "not-a-number");
        std::env::set_var("BADWORDS_PREFS_PATH", "/tmp/badwords-prefs.json");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.api_base, "http://localhost:8000");
    assert_eq!(cfg.timeouts.request_secs, 5);
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    assert_eq!(cfg.prefs_path, Some(PathBuf::from("/tmp/badwords-prefs.json")));

    unsafe { clear_badwords_env() };
}

#[test]
fn new_rejects_non_http_base() {
    assert_eq!(ClientConfig::new("ftp://example.com"), Err(ConfigError::InvalidBaseUrl("ftp://example.com".into())));
    assert!(ClientConfig::new("").is_err());
    assert!(ClientConfig::new("https://").is_err());
}

#[test]
fn urls_follow_collection_layout() {
    let cfg = ClientConfig::new("https://api.example.test").unwrap();
    assert_eq!(cfg.count_url(), "https://api.example.test/api/v1/badword/?page=1");
    assert_eq!(cfg.page_url(3), "https://api.example.test/api/v1/badword/?page=3");
    assert_eq!(cfg.create_url(), "https://api.example.test/api/v1/badword/");
    assert_eq!(cfg.csv_download_url(), "https://api.example.test/media/words/bad_words.csv");
}
