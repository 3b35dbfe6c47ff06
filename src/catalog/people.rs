//! Cast and crew listings.

#[cfg(test)]
#[path = "people_test.rs"]
mod people_test;

use super::page_query;
use crate::net::client::ResourceClient;
use crate::net::error::{Action, ActionError};
use crate::net::types::{Page, Person};

/// `GET /frontend/peoples?page=&page_size=`
///
/// # Errors
///
/// Normalized [`ActionError`] for any backend or transport failure.
pub async fn fetch_people(api: &ResourceClient, page: u32, page_size: u32) -> Result<Page<Person>, ActionError> {
    api.get("/frontend/peoples", &page_query(page, page_size))
        .await
        .map_err(|e| ActionError::from_api(Action::FetchPeople, api.locale(), e))
}
