//! # Roster Application Library
//!
//! Configuration, error handling and bootstrap for the `roster` binary.
//!
//! ## Modules
//!
//! - `app`: Application state and store selection
//! - `config`: Configuration management
//! - `error`: Unified application error
//! - `seed`: Demo data for local development

pub mod app;
pub mod config;
pub mod error;
pub mod seed;
