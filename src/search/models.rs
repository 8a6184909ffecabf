//! Search query and result data models

use crate::entity::EntityType;
use crate::store::StoreHit;
use crate::{DEFAULT_LIMIT, MAX_LIMIT};
use serde::{Deserialize, Serialize};

/// A logical search request after wire-level parsing.
///
/// `types` holds only recognized entity types; unrecognized names are
/// dropped at the parse boundary. An empty set means "all types".
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Free-text query string.
    pub text: String,
    /// Requested entity types; empty means all.
    pub types: Vec<EntityType>,
    /// Requested result count before clamping.
    pub limit: i64,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            types: vec![],
            limit: DEFAULT_LIMIT as i64,
        }
    }

    pub fn with_types(mut self, types: Vec<EntityType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Trimmed query text.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Effective type set in the fixed Track, Artist, Playlist order.
    ///
    /// An empty request (or one whose types were all unrecognized and
    /// dropped) falls back to the full set.
    pub fn normalized_types(&self) -> Vec<EntityType> {
        if self.types.is_empty() {
            return EntityType::ALL.to_vec();
        }
        EntityType::ALL
            .iter()
            .copied()
            .filter(|t| self.types.contains(t))
            .collect()
    }

    /// Effective limit: non-positive values default, large values clamp.
    pub fn normalized_limit(&self) -> usize {
        if self.limit <= 0 {
            DEFAULT_LIMIT
        } else {
            (self.limit as usize).min(MAX_LIMIT)
        }
    }
}

/// One scored hit tagged with its entity type, ready for merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub score: f32,
}

impl RawResult {
    /// Map a store hit to a display result for the given type.
    ///
    /// Display fields come from the stored source per type; absent fields
    /// become empty strings, never null. The id falls back to the
    /// store-side document id when the source carries none.
    pub fn from_hit(entity_type: EntityType, hit: StoreHit) -> Self {
        let src = &hit.source;
        let field = |name: &str| -> String {
            src.get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let mut id = field("id");
        if id.is_empty() {
            id = hit.id.clone();
        }

        let (title, subtitle) = match entity_type {
            EntityType::Track => (field("title"), field("artistName")),
            EntityType::Artist => (field("name"), field("country")),
            EntityType::Playlist => (field("title"), field("ownerName")),
        };

        Self {
            entity_type,
            id,
            title,
            subtitle,
            score: hit.score.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_types_expand_to_all() {
        let query = SearchQuery::new("metallica");
        assert_eq!(query.normalized_types(), EntityType::ALL.to_vec());
    }

    #[test]
    fn test_types_keep_fixed_order() {
        let query = SearchQuery::new("metallica")
            .with_types(vec![EntityType::Playlist, EntityType::Track]);
        assert_eq!(
            query.normalized_types(),
            vec![EntityType::Track, EntityType::Playlist]
        );
    }

    #[test]
    fn test_limit_defaults_and_clamps() {
        assert_eq!(SearchQuery::new("x").with_limit(0).normalized_limit(), 10);
        assert_eq!(SearchQuery::new("x").with_limit(-3).normalized_limit(), 10);
        assert_eq!(SearchQuery::new("x").with_limit(500).normalized_limit(), 50);
        assert_eq!(SearchQuery::new("x").with_limit(25).normalized_limit(), 25);
    }

    #[test]
    fn test_from_hit_field_mapping() {
        let hit = StoreHit {
            id: "es-doc-1".to_string(),
            score: Some(8.5),
            source: serde_json::json!({
                "id": "t1",
                "title": "One",
                "artistName": "Metallica"
            }),
        };
        let result = RawResult::from_hit(EntityType::Track, hit);
        assert_eq!(result.id, "t1");
        assert_eq!(result.title, "One");
        assert_eq!(result.subtitle, "Metallica");
        assert_eq!(result.score, 8.5);
    }

    #[test]
    fn test_from_hit_defaults() {
        let hit = StoreHit {
            id: "fallback-id".to_string(),
            score: None,
            source: serde_json::json!({}),
        };
        let result = RawResult::from_hit(EntityType::Artist, hit);
        assert_eq!(result.id, "fallback-id");
        assert_eq!(result.title, "");
        assert_eq!(result.subtitle, "");
        assert_eq!(result.score, 0.0);
    }
}
