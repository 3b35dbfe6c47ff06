//! Catalog resources: thin wrappers over the resource client.
//!
//! Every call follows the same shape: build the endpoint, send, reshape the
//! JSON where the views need derived fields, and on failure log and re-raise
//! a normalized [`ActionError`](crate::net::error::ActionError).

pub mod genres;
pub mod movies;
pub mod people;
pub mod users;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub(crate) fn page_query(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("page_size", page_size.to_string())]
}
