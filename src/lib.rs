//! # cinedesk
//!
//! Native client for the movie catalog and admin console backend.
//!
//! The crate holds the client-side pieces of the catalog front-end: the
//! session store (who is signed in, persisted across runs), the navigation
//! guard that gates views on that session, the REST resource client, and
//! thin catalog modules for users, movies, genres, and people. The
//! `cinedesk` binary wires them together behind a CLI.

pub mod catalog;
pub mod config;
pub mod net;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
