//! Domain logic for the project catalogue.
//!
//! This crate performs no I/O against the database or the network, so the
//! repository layer, the HTTP server and tests can all share it.

pub mod cover_image;
pub mod error;
pub mod listing;
pub mod project;
pub mod record_store;
pub mod search_history;
pub mod types;
