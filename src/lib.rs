//! Tunegate: a search and bulk-indexing gateway for music catalogs
//!
//! Exposes one logical search API over independently-indexed entity
//! types (tracks, artists, playlists) held in a document search engine,
//! plus a validated bulk-write path into the same collections.

pub mod bulk;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod store;
pub mod web;

pub use bulk::{BulkOutcome, BulkUpserter};
pub use config::Settings;
pub use entity::{EntityPayload, EntityType};
pub use error::GatewayError;
pub use search::{RawResult, SearchCoordinator, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result count used when the caller requests none (or a non-positive one)
pub const DEFAULT_LIMIT: usize = 10;

/// Hard cap on the result count per search
pub const MAX_LIMIT: usize = 50;
