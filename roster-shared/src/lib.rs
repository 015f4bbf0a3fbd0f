//! # Roster Shared Library
//!
//! Entities, stores and business logic for the User and Category slices.
//!
//! ## Module Organization
//!
//! - `models`: User and Category entities
//! - `store`: store traits plus in-memory and PostgreSQL implementations
//! - `services`: filtering, search and aggregation on top of the stores
//! - `db`: PostgreSQL pool and migrations

pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Roster shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
