//! Movie listings, search, and detail.
//!
//! List and detail responses are reshaped for display: the five-point
//! `rating` is half of `vote_average`, and `director`/`cast` are lifted out
//! of the nested credit records the backend embeds.

#[cfg(test)]
#[path = "movies_test.rs"]
mod movies_test;

use serde_json::Value;

use super::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, page_query};
use crate::net::client::ResourceClient;
use crate::net::error::{Action, ActionError, Locale};
use crate::net::types::{Movie, Page};

const MOVIES_PATH: &str = "/frontend/movies";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieQuery {
    pub page: u32,
    pub page_size: u32,
    /// Genre filter; `None` lists every genre.
    pub genre: Option<String>,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE, genre: None }
    }
}

impl MovieQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = page_query(self.page, self.page_size);
        if let Some(genre) = &self.genre {
            query.push(("genre", genre.clone()));
        }
        query
    }
}

/// `GET /frontend/movies` with list reshaping applied to every result.
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn fetch_movies(api: &ResourceClient, query: &MovieQuery) -> Result<Page<Movie>, ActionError> {
    let mut page: Page<Movie> = api
        .get(MOVIES_PATH, &query.to_query())
        .await
        .map_err(|e| ActionError::from_api(Action::FetchMovies, api.locale(), e))?;
    let locale = api.locale();
    page.results = page.results.into_iter().map(|m| shape_list_movie(m, locale)).collect();
    Ok(page)
}

/// Free-text search over the same endpoint. Results are returned as sent.
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn search_movies(
    api: &ResourceClient,
    text: &str,
    page: u32,
    page_size: u32,
) -> Result<Page<Movie>, ActionError> {
    let mut query = vec![("query", text.to_owned())];
    query.extend(page_query(page, page_size));
    api.get(MOVIES_PATH, &query)
        .await
        .map_err(|e| ActionError::from_api(Action::SearchMovies, api.locale(), e))
}

/// `GET /frontend/movies/{id}` with detail reshaping.
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn get_movie(api: &ResourceClient, id: u64) -> Result<Movie, ActionError> {
    let movie: Movie = api
        .get(&format!("{MOVIES_PATH}/{id}"), &[])
        .await
        .map_err(|e| ActionError::from_api(Action::GetMovie, api.locale(), e))?;
    Ok(shape_detail_movie(movie))
}

pub(crate) fn shape_list_movie(mut movie: Movie, locale: Locale) -> Movie {
    let director = movie
        .extra
        .get("Director")
        .and_then(person_name)
        .map_or_else(|| locale.no_director().to_owned(), ToOwned::to_owned);
    movie.director = director;
    movie.rating = movie.vote_average / 2.0;
    movie
}

pub(crate) fn shape_detail_movie(mut movie: Movie) -> Movie {
    let credits = movie.extra.get("Credits").and_then(Value::as_array);
    let director = lead_credit_name(credits, "crew");
    let cast = lead_credit_name(credits, "cast");
    movie.director = director;
    movie.cast = cast;
    movie.rating = movie.vote_average / 2.0;
    movie
}

/// Name of the first `order == 0` credit of the given type, or empty.
fn lead_credit_name(credits: Option<&Vec<Value>>, credit_type: &str) -> String {
    credits
        .into_iter()
        .flatten()
        .find(|c| {
            c.get("credit_type").and_then(Value::as_str) == Some(credit_type)
                && c.get("order").and_then(Value::as_i64) == Some(0)
        })
        .and_then(person_name)
        .unwrap_or_default()
        .to_owned()
}

fn person_name(record: &Value) -> Option<&str> {
    record.get("People")?.get("name")?.as_str()
}
