//! Network layer: wire DTOs, error normalization, and the REST resource client.

pub mod client;
pub mod error;
pub mod types;
