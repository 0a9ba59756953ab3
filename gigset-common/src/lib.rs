//! # Gigset Common Library
//!
//! Shared code for the gigset crates:
//! - Error type and result alias
//! - TOML configuration loading with graceful defaults
//! - Tracing initialisation
//! - Catalog song model shared by lookup adapters

pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use error::{Error, Result};
pub use models::{match_key, CatalogSong};
