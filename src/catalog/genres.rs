//! Genre administration.

#[cfg(test)]
#[path = "genres_test.rs"]
mod genres_test;

use serde::Serialize;

use crate::net::client::ResourceClient;
use crate::net::error::{Action, ActionError};
use crate::net::types::Genre;

const GENRES_PATH: &str = "/admin/genres";

/// Body for creating a genre.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewGenre {
    pub name: String,
}

fn genre_path(id: i64) -> String {
    format!("{GENRES_PATH}/{id}")
}

/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn fetch_genres(api: &ResourceClient) -> Result<Vec<Genre>, ActionError> {
    api.get(GENRES_PATH, &[])
        .await
        .map_err(|e| ActionError::from_api(Action::FetchGenres, api.locale(), e))
}

/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn get_genre(api: &ResourceClient, id: i64) -> Result<Genre, ActionError> {
    api.get(&genre_path(id), &[])
        .await
        .map_err(|e| ActionError::from_api(Action::GetGenre, api.locale(), e))
}

/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn add_genre(api: &ResourceClient, genre: &NewGenre) -> Result<Genre, ActionError> {
    api.post(GENRES_PATH, genre)
        .await
        .map_err(|e| ActionError::from_api(Action::AddGenre, api.locale(), e))
}

/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn update_genre(api: &ResourceClient, genre: &Genre) -> Result<Genre, ActionError> {
    api.put(&genre_path(genre.id), genre)
        .await
        .map_err(|e| ActionError::from_api(Action::UpdateGenre, api.locale(), e))
}

/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn delete_genre(api: &ResourceClient, id: i64) -> Result<(), ActionError> {
    api.delete(&genre_path(id))
        .await
        .map(|_| ())
        .map_err(|e| ActionError::from_api(Action::DeleteGenre, api.locale(), e))
}
