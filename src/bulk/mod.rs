//! Bulk-upsert orchestration
//!
//! Validates a heterogeneous batch of entities, forwards the accepted
//! items to the store as one batch write, and reconciles the outcome
//! into a per-item report. Per-item validation failures never block
//! sibling items; a failure of the batch call itself collapses into one
//! synthetic batch-wide error.

use crate::entity::{EntityEnvelope, EntityType};
use crate::store::{BulkDocument, DocumentStore};
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{info, warn};

/// Index marking a batch-wide error rather than a per-item one.
pub const BATCH_ERROR_INDEX: i64 = -1;

fn serialize_error_type<S: Serializer>(
    ty: &Option<EntityType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ty {
        Some(t) => t.serialize(serializer),
        None => serializer.serialize_str("unspecified"),
    }
}

/// One rejected item, at its original batch position.
#[derive(Debug, Clone, Serialize)]
pub struct BulkError {
    pub item_index: i64,
    #[serde(rename = "type", serialize_with = "serialize_error_type")]
    pub entity_type: Option<EntityType>,
    pub id: String,
    pub message: String,
}

impl BulkError {
    fn item(index: usize, entity_type: Option<EntityType>, message: impl Into<String>) -> Self {
        Self {
            item_index: index as i64,
            entity_type,
            id: String::new(),
            message: message.into(),
        }
    }

    fn batch(message: impl Into<String>) -> Self {
        Self {
            item_index: BATCH_ERROR_INDEX,
            entity_type: None,
            id: String::new(),
            message: message.into(),
        }
    }
}

/// Reconciled result of one bulk call.
///
/// `total == success + failed` holds for every outcome; when the batch
/// write itself failed, all items count as failed behind one error at
/// index -1.
#[derive(Debug, Clone, Serialize)]
pub struct BulkOutcome {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<BulkError>,
}

impl BulkOutcome {
    fn empty() -> Self {
        Self {
            total: 0,
            success: 0,
            failed: 0,
            errors: vec![],
        }
    }
}

/// Report for the single-entity upsert path.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertReport {
    pub ok: bool,
    #[serde(rename = "type", serialize_with = "serialize_error_type")]
    pub entity_type: Option<EntityType>,
    pub id: String,
    pub collection: String,
    pub message: String,
}

impl UpsertReport {
    fn rejected(entity_type: Option<EntityType>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entity_type,
            id: String::new(),
            collection: String::new(),
            message: message.into(),
        }
    }
}

/// Orchestrates validation and batch submission for upserts.
pub struct BulkUpserter {
    store: Arc<dyn DocumentStore>,
}

impl BulkUpserter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validate and write a mixed batch of entities.
    ///
    /// Items are owned only for the duration of this call. The store is
    /// contacted at most once, and only when at least one item passed
    /// validation.
    pub async fn bulk_upsert(&self, entities: &[EntityEnvelope]) -> BulkOutcome {
        let total = entities.len();
        if total == 0 {
            return BulkOutcome::empty();
        }

        let mut docs: Vec<BulkDocument> = Vec::with_capacity(total);
        let mut errors: Vec<BulkError> = Vec::new();

        for (index, envelope) in entities.iter().enumerate() {
            let payload = match envelope.payload() {
                Some(p) => p,
                None => {
                    errors.push(BulkError::item(index, None, "payload not set"));
                    continue;
                }
            };

            let ty = payload.entity_type();
            if payload.id().is_empty() {
                errors.push(BulkError::item(
                    index,
                    Some(ty),
                    format!("{}.id is required", ty),
                ));
                continue;
            }

            match payload.to_document() {
                Ok(document) => docs.push(BulkDocument {
                    collection: ty.collection(),
                    id: payload.id().to_string(),
                    document,
                }),
                Err(e) => {
                    errors.push(BulkError::item(
                        index,
                        Some(ty),
                        format!("{} could not be converted: {}", ty, e),
                    ));
                }
            }
        }

        if !docs.is_empty() {
            if let Err(e) = self.store.batch_write(&docs).await {
                // The batch call failed as a whole: no accepted item's
                // write status is known, so the per-item accounting is
                // discarded for one batch-wide error.
                warn!("batch write of {} documents failed: {}", docs.len(), e);
                return BulkOutcome {
                    total,
                    success: 0,
                    failed: total,
                    errors: vec![BulkError::batch(format!("bulk error: {}", e))],
                };
            }
        }

        info!(
            "bulk upsert: {} accepted, {} rejected of {}",
            docs.len(),
            errors.len(),
            total
        );

        BulkOutcome {
            total,
            success: docs.len(),
            failed: errors.len(),
            errors,
        }
    }

    /// Write a single entity.
    pub async fn upsert(&self, envelope: &EntityEnvelope) -> UpsertReport {
        let payload = match envelope.payload() {
            Some(p) => p,
            None => return UpsertReport::rejected(None, "entity is required"),
        };

        let ty = payload.entity_type();
        if payload.id().is_empty() {
            return UpsertReport::rejected(Some(ty), format!("{}.id is required", ty));
        }

        let document = match payload.to_document() {
            Ok(d) => d,
            Err(e) => {
                return UpsertReport::rejected(
                    Some(ty),
                    format!("{} could not be converted: {}", ty, e),
                )
            }
        };

        let doc = BulkDocument {
            collection: ty.collection(),
            id: payload.id().to_string(),
            document,
        };

        match self.store.batch_write(std::slice::from_ref(&doc)).await {
            Ok(()) => UpsertReport {
                ok: true,
                entity_type: Some(ty),
                id: doc.id,
                collection: doc.collection.to_string(),
                message: "indexed".to_string(),
            },
            Err(e) => {
                warn!("upsert of {} {} failed: {}", ty, doc.id, e);
                UpsertReport {
                    ok: false,
                    entity_type: Some(ty),
                    id: doc.id,
                    collection: doc.collection.to_string(),
                    message: format!("error: {}", e),
                }
            }
        }
    }
}
