//! User administration and profile lookups.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use serde_json::Value;

use super::page_query;
use crate::net::client::ResourceClient;
use crate::net::error::{Action, ActionError};
use crate::net::types::{Page, User};

fn user_path(id: u64) -> String {
    format!("/frontend/users/{id}")
}

fn admin_user_path(id: u64) -> String {
    format!("/admin/users/{id}")
}

/// `GET /frontend/users/{id}`
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn fetch_user(api: &ResourceClient, id: u64) -> Result<User, ActionError> {
    api.get(&user_path(id), &[])
        .await
        .map_err(|e| ActionError::from_api(Action::FetchUser, api.locale(), e))
}

/// `GET /admin/users?page=&page_size=`
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn fetch_users(api: &ResourceClient, page: u32, page_size: u32) -> Result<Page<User>, ActionError> {
    api.get("/admin/users", &page_query(page, page_size))
        .await
        .map_err(|e| ActionError::from_api(Action::FetchUsers, api.locale(), e))
}

/// `PUT /admin/users/{id}` with a partial user body.
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn update_user(api: &ResourceClient, id: u64, changes: &Value) -> Result<User, ActionError> {
    api.put(&admin_user_path(id), changes)
        .await
        .map_err(|e| ActionError::from_api(Action::UpdateUser, api.locale(), e))
}

/// `DELETE /admin/users/{id}`; returns the backend's confirmation body.
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn delete_user(api: &ResourceClient, id: u64) -> Result<Value, ActionError> {
    api.delete(&admin_user_path(id))
        .await
        .map_err(|e| ActionError::from_api(Action::DeleteUser, api.locale(), e))
}
