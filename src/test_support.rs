//! Shared helpers for tests that need a live backend.

use std::path::PathBuf;

use crate::config::ClientConfig;
use crate::net::error::Locale;

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub(crate) async fn spawn_backend(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a port that nothing listens on.
pub(crate) async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub(crate) fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, "/api/v1", PathBuf::from("unused-session.json"), Locale::En)
}
