//! Wire DTOs for the catalog backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON so serde round-trips stay lossless.
//! Catalog records keep unknown keys in a flattened `extra` map because the
//! backend returns wide, loosely populated rows and the client only reads a
//! handful of fields.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const ADMIN_ROLE: &str = "admin";

/// An authenticated account as returned by login and the user endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    /// Backend rows carry gender as either a code or a label.
    #[serde(default, deserialize_with = "deserialize_opt_string_or_number")]
    pub gender: Option<String>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Body of `POST /users/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /users/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Successful login payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Paginated list envelope used by every list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A catalog movie plus the display fields the client derives from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Five-point rating derived from `vote_average`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A cast or crew member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub known_for_department: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn deserialize_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected string or number, got {other}"))),
    }
}
