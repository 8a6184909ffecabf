//! Document store interface
//!
//! The gateway talks to the search engine through the narrow
//! [`DocumentStore`] trait: a per-collection free-text query and a batch
//! write. Relevance scoring, tokenization, and durability are the store's
//! concern, not the gateway's.

mod elastic;

pub use elastic::ElasticClient;

use async_trait::async_trait;
use thiserror::Error;

/// Failures talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connectivity or timeout failure; the store could not be reached.
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// The store was reached but rejected the operation.
    #[error("store rejected request: {0}")]
    Rejected(String),
}

/// A single scored hit as returned by the store, untyped.
///
/// The gateway maps hits to display results per entity type; the store
/// only knows collections and documents.
#[derive(Debug, Clone)]
pub struct StoreHit {
    /// Store-side document id.
    pub id: String,
    /// Relevance score; absent for unscored hits.
    pub score: Option<f32>,
    /// The stored document source.
    pub source: serde_json::Value,
}

/// One document in a batch write, keyed by collection and id.
#[derive(Debug, Clone)]
pub struct BulkDocument {
    pub collection: &'static str,
    pub id: String,
    pub document: serde_json::Value,
}

/// Narrow interface to the underlying search engine.
///
/// Implementations must be safe for concurrent use from simultaneous
/// search and bulk calls; the gateway shares one client across all
/// requests and never recreates it per call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Execute a free-text query against one collection, returning up to
    /// `limit` scored hits with the given field weighting.
    async fn query(
        &self,
        collection: &str,
        text: &str,
        limit: usize,
        field_weights: &[(&str, f32)],
    ) -> Result<Vec<StoreHit>, StoreError>;

    /// Write all documents in one batch operation. The call succeeds or
    /// fails as a whole transport operation; per-document outcomes are
    /// not reported.
    async fn batch_write(&self, items: &[BulkDocument]) -> Result<(), StoreError>;
}
