//! HTTP request handlers

use super::state::AppState;
use crate::bulk::{BulkOutcome, UpsertReport};
use crate::entity::{EntityEnvelope, EntityType};
use crate::error::GatewayError;
use crate::search::{RawResult, SearchQuery};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Entity types (comma-separated); unrecognized names are dropped
    pub types: Option<String>,
    /// Result count
    pub limit: Option<i64>,
}

/// Search results response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<RawResult>,
}

/// Single-upsert request body
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    pub entity: Option<EntityEnvelope>,
}

/// Bulk-upsert request body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BulkUpsertRequest {
    pub entities: Vec<EntityEnvelope>,
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, GatewayError> {
    let text = params.q.unwrap_or_default();

    let types: Vec<EntityType> = params
        .types
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(EntityType::parse)
        .collect();

    let query = SearchQuery::new(text.clone())
        .with_types(types)
        .with_limit(params.limit.unwrap_or(0));

    let results = state.search.search(&query).await?;

    Ok(Json(SearchResponse {
        query: text,
        results,
    }))
}

/// Single-entity upsert handler
pub async fn upsert(
    State(state): State<AppState>,
    Json(request): Json<UpsertRequest>,
) -> Json<UpsertReport> {
    let envelope = request.entity.unwrap_or_default();
    Json(state.upserter.upsert(&envelope).await)
}

/// Bulk upsert handler
///
/// Always answers 200 with a reconciled outcome; catastrophic batch
/// failures are reported inside the body, not as an HTTP error.
pub async fn bulk_upsert(
    State(state): State<AppState>,
    Json(request): Json<BulkUpsertRequest>,
) -> Json<BulkOutcome> {
    Json(state.upserter.bulk_upsert(&request.entities).await)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_param_parsing_drops_garbage() {
        let raw = "track,podcast, ARTISTS ,";
        let types: Vec<EntityType> = raw.split(',').filter_map(EntityType::parse).collect();
        assert_eq!(types, vec![EntityType::Track, EntityType::Artist]);
    }

    #[test]
    fn test_bulk_request_defaults_to_empty() {
        let request: BulkUpsertRequest = serde_json::from_str("{}").unwrap();
        assert!(request.entities.is_empty());
    }

    #[test]
    fn test_bulk_request_mixed_entities() {
        let request: BulkUpsertRequest = serde_json::from_str(
            r#"{"entities": [
                {"track": {"id": "t1", "title": "One"}},
                {"artist": {"id": "", "name": "Nameless"}},
                {}
            ]}"#,
        )
        .unwrap();
        assert_eq!(request.entities.len(), 3);
        assert!(request.entities[0].payload().is_some());
        assert!(request.entities[2].payload().is_none());
    }
}
