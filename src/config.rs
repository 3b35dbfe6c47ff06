//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::net::error::Locale;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
const SESSION_DIR: &str = "cinedesk";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown CINEDESK_LOCALE: {0}")]
    UnknownLocale(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub base_url: String,
    /// Path prefix shared by every API route, always starting with `/`.
    pub api_prefix: String,
    /// Durable session storage location.
    pub session_file: PathBuf,
    /// Language for fallback error messages.
    pub locale: Locale,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CINEDESK_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `CINEDESK_API_PREFIX`: default `/api/v1`
    /// - `CINEDESK_SESSION_FILE`: default `<config dir>/cinedesk/session.json`
    /// - `CINEDESK_LOCALE`: `en` (default) or `zh`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLocale`] for an unsupported locale.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("CINEDESK_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let api_prefix = lookup("CINEDESK_API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_owned());
        let session_file = lookup("CINEDESK_SESSION_FILE").map_or_else(default_session_file, PathBuf::from);
        let locale = parse_locale(lookup("CINEDESK_LOCALE").as_deref())?;

        Ok(Self::new(&base_url, &api_prefix, session_file, locale))
    }

    /// Build a config from explicit parts, normalizing URL and prefix.
    #[must_use]
    pub fn new(base_url: &str, api_prefix: &str, session_file: PathBuf, locale: Locale) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_prefix: normalize_prefix(api_prefix),
            session_file,
            locale,
        }
    }

    /// Full URL for an API path such as `/frontend/movies`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_API_PREFIX, default_session_file(), Locale::default())
    }
}

pub(crate) fn parse_locale(raw: Option<&str>) -> Result<Locale, ConfigError> {
    match raw.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
        None | Some("" | "en") => Ok(Locale::En),
        Some("zh" | "zh-cn") => Ok(Locale::Zh),
        Some(other) => Err(ConfigError::UnknownLocale(other.to_owned())),
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn default_session_file() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(SESSION_DIR).join(SESSION_FILE),
        None => PathBuf::from(".cinedesk").join(SESSION_FILE),
    }
}
