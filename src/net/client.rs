//! REST resource client shared by the session store and catalog modules.
//!
//! DESIGN
//! ======
//! The client never caches credentials. Each request asks its
//! [`CredentialSource`] for the current bearer token, so logging in or out
//! through the session store takes effect on the very next call without
//! mutating any client-wide defaults.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, Locale};
use crate::config::ClientConfig;

/// Supplies the credential attached to outgoing requests.
pub trait CredentialSource: Send + Sync {
    /// Current access token, or `None` when anonymous.
    fn bearer_token(&self) -> Option<String>;
}

/// Credential source for callers that never authenticate.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// JSON-over-HTTP client bound to one backend.
#[derive(Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    credentials: Arc<dyn CredentialSource>,
}

impl ResourceClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialSource>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config: Arc::new(config), credentials })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    /// Perform one request and return the decoded JSON body.
    ///
    /// An empty 2xx body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses (with the server's `error` text
    /// when present), and undecodable bodies.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.config.endpoint(path);
        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.credentials.bearer_token() {
            request = request.header(AUTHORIZATION, bearer_value(&token)?);
        }
        if let Some(json) = body {
            request = request.json(&json);
        }

        tracing::debug!(%method, %url, "resource request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = decode_body(&text).ok().as_ref().and_then(error_message_from_body);
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        Ok(decode_body(&text)?)
    }

    /// # Errors
    ///
    /// See [`ResourceClient::request`]; also fails if the body does not match `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let value = self.request(Method::GET, path, query, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    ///
    /// See [`ResourceClient::request`]; also fails if the body does not match `T`.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let value = self.request(Method::POST, path, &[], Some(serde_json::to_value(body)?)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    ///
    /// See [`ResourceClient::request`]; also fails if the body does not match `T`.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let value = self.request(Method::PUT, path, &[], Some(serde_json::to_value(body)?)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// # Errors
    ///
    /// See [`ResourceClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, &[], None).await
    }
}

pub(crate) fn bearer_value(token: &str) -> Result<HeaderValue, ApiError> {
    Ok(HeaderValue::from_str(&format!("Bearer {token}"))?)
}

pub(crate) fn decode_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
}

/// Pull the human-readable message out of a backend error body.
pub(crate) fn error_message_from_body(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(ToOwned::to_owned)
}
