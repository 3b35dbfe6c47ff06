//! Client-side state: durable storage and the session store.
//!
//! DESIGN
//! ======
//! Storage is a plain string key/value seam so the session store can be
//! exercised against an in-memory map in tests and a JSON file in the CLI.

pub mod session;
pub mod storage;
