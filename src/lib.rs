//! Mini Cache - An in-process key/value cache
//!
//! Provides an unbounded store and a TTL store with background expiry
//! behind one capability contract, plus a small HTTP front end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
mod tasks;

pub use api::AppState;
pub use cache::{Cache, SimpleCache, TtlCache};
pub use config::Config;
