use std::collections::HashMap;

use super::*;

// =============================================================================
// parse_locale
// =============================================================================

#[test]
fn parse_locale_defaults_to_english() {
    assert_eq!(parse_locale(None).unwrap(), Locale::En);
    assert_eq!(parse_locale(Some("")).unwrap(), Locale::En);
}

#[test]
fn parse_locale_accepts_chinese_variants() {
    assert_eq!(parse_locale(Some("zh")).unwrap(), Locale::Zh);
    assert_eq!(parse_locale(Some(" ZH-CN ")).unwrap(), Locale::Zh);
}

#[test]
fn parse_locale_rejects_unknown() {
    let err = parse_locale(Some("fr")).unwrap_err();
    assert_eq!(err.to_string(), "unknown CINEDESK_LOCALE: fr");
}

// =============================================================================
// normalization
// =============================================================================

#[test]
fn new_trims_trailing_slash_from_base_url() {
    let cfg = ClientConfig::new("http://example.test:8080/", "/api/v1", PathBuf::from("s.json"), Locale::En);
    assert_eq!(cfg.base_url, "http://example.test:8080");
}

#[test]
fn new_normalizes_prefix_slashes() {
    let cfg = ClientConfig::new("http://h", "api/v2/", PathBuf::from("s.json"), Locale::En);
    assert_eq!(cfg.api_prefix, "/api/v2");
}

#[test]
fn new_allows_empty_prefix() {
    let cfg = ClientConfig::new("http://h", "/", PathBuf::from("s.json"), Locale::En);
    assert_eq!(cfg.api_prefix, "");
    assert_eq!(cfg.endpoint("/frontend/movies"), "http://h/frontend/movies");
}

#[test]
fn endpoint_joins_base_prefix_and_path() {
    let cfg = ClientConfig::new("http://h/", "/api/v1", PathBuf::from("s.json"), Locale::En);
    assert_eq!(cfg.endpoint("/frontend/users/login"), "http://h/api/v1/frontend/users/login");
}

#[test]
fn default_uses_documented_values() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.api_prefix, DEFAULT_API_PREFIX);
    assert_eq!(cfg.locale, Locale::En);
    assert!(cfg.session_file.ends_with("session.json"));
}

// =============================================================================
// from_env
// =============================================================================

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_without_variables_uses_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn from_lookup_reads_every_variable() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("CINEDESK_BASE_URL", "https://catalog.example.test/"),
        ("CINEDESK_API_PREFIX", "api/v2"),
        ("CINEDESK_SESSION_FILE", "/tmp/cinedesk-test/session.json"),
        ("CINEDESK_LOCALE", "zh-CN"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://catalog.example.test");
    assert_eq!(cfg.api_prefix, "/api/v2");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/cinedesk-test/session.json"));
    assert_eq!(cfg.locale, Locale::Zh);
}

#[test]
fn from_lookup_rejects_unknown_locale() {
    let err = ClientConfig::from_lookup(lookup_from(&[("CINEDESK_LOCALE", "klingon")])).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLocale(ref raw) if raw == "klingon"));
}

/// The only test in this crate that touches `CINEDESK_*` variables.
#[test]
fn from_env_reads_process_environment() {
    unsafe {
        std::env::set_var("CINEDESK_BASE_URL", "http://env.example.test:9000/");
        std::env::set_var("CINEDESK_LOCALE", "zh");
    }
    let cfg = ClientConfig::from_env();
    unsafe {
        std::env::remove_var("CINEDESK_BASE_URL");
        std::env::remove_var("CINEDESK_LOCALE");
    }

    let cfg = cfg.unwrap();
    assert_eq!(cfg.base_url, "http://env.example.test:9000");
    assert_eq!(cfg.locale, Locale::Zh);
}
