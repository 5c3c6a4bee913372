//! vocaquiz-sources: item source integrations.
//!
//! Implements the `ItemSource` trait for the words REST API, local TOML
//! deck files, and an in-memory mock, plus the config that selects one.

pub mod config;
pub mod deck;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config_from, SourceConfig, VocaquizConfig};
pub use deck::DeckSource;
pub use http::HttpSource;
pub use mock::MockSource;
pub use vocaquiz_core::error::SourceError;
