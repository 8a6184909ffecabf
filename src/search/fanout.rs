//! Concurrent per-type query fan-out

use super::merge::merge;
use super::models::{RawResult, SearchQuery};
use crate::entity::EntityType;
use crate::error::GatewayError;
use crate::store::DocumentStore;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Coordinates one logical search across the per-type collections.
///
/// Holds a shared store client; the coordinator itself carries no mutable
/// state, so one instance serves all concurrent requests.
pub struct SearchCoordinator {
    store: Arc<dyn DocumentStore>,
}

impl SearchCoordinator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Execute a search: validate, fan out one sub-query per effective
    /// type, join, merge.
    ///
    /// Any failed sub-query fails the whole search; the merge never sees
    /// partial per-type results. `try_join_all` drops the remaining
    /// in-flight sub-queries once one has failed.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<RawResult>, GatewayError> {
        let text = query.trimmed_text();
        if text.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }

        let types = query.normalized_types();
        let limit = query.normalized_limit();

        info!("searching '{}' across {} collections", text, types.len());

        // Each sub-query requests the full limit, not limit/n: an early
        // per-type cap would starve the post-merge truncation.
        let futures: Vec<_> = types
            .iter()
            .map(|&ty| self.sub_query(ty, text, limit))
            .collect();

        let groups = try_join_all(futures).await?;

        Ok(merge(groups, limit))
    }

    async fn sub_query(
        &self,
        ty: EntityType,
        text: &str,
        limit: usize,
    ) -> Result<Vec<RawResult>, GatewayError> {
        let hits = self
            .store
            .query(ty.collection(), text, limit, ty.field_weights())
            .await
            .map_err(|e| {
                warn!("sub-query for {} failed: {}", ty, e);
                GatewayError::from(e)
            })?;

        debug!("collection {} returned {} hits", ty.collection(), hits.len());

        Ok(hits
            .into_iter()
            .map(|hit| RawResult::from_hit(ty, hit))
            .collect())
    }
}
