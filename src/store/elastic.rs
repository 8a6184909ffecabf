//! Elasticsearch-compatible HTTP client

use super::{BulkDocument, DocumentStore, StoreError, StoreHit};
use crate::config::StoreSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client for an Elasticsearch-compatible document store.
///
/// Wraps a shared reqwest connection pool; cloning is cheap and all
/// clones share the pool, so one instance serves every concurrent
/// search and bulk call.
#[derive(Clone)]
pub struct ElasticClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    hits: HitsWrapper,
}

#[derive(Debug, Default, Deserialize)]
struct HitsWrapper {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f32>,
    #[serde(rename = "_source", default)]
    source: serde_json::Value,
}

impl ElasticClient {
    /// Create a client from store settings.
    pub fn with_settings(settings: &StoreSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .gzip(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::Rejected(format!("bad store path {}: {}", path, e)))
    }

    /// Send-level failures mean the store never gave a response: connect
    /// refused, DNS, timeout. All count as unavailable.
    fn transport_error(err: reqwest::Error) -> StoreError {
        StoreError::Unavailable(err.to_string())
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            Err(StoreError::Unavailable(format!("store returned {}: {}", status, body)))
        } else {
            Err(StoreError::Rejected(format!("store returned {}: {}", status, body)))
        }
    }
}

#[async_trait]
impl DocumentStore for ElasticClient {
    async fn query(
        &self,
        collection: &str,
        text: &str,
        limit: usize,
        field_weights: &[(&str, f32)],
    ) -> Result<Vec<StoreHit>, StoreError> {
        let fields: Vec<String> = field_weights
            .iter()
            .map(|(field, weight)| format!("{}^{}", field, weight))
            .collect();

        let body = serde_json::json!({
            "size": limit,
            "query": {
                "multi_match": {
                    "query": text,
                    "fields": fields,
                }
            }
        });

        let url = self.endpoint(&format!("{}/_search", collection))?;
        debug!("querying collection {} (limit {})", collection, limit);

        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;
        let resp = Self::check_status(resp).await?;

        let parsed: SearchBody = resp
            .json()
            .await
            .map_err(|e| StoreError::Rejected(format!("malformed search response: {}", e)))?;

        Ok(parsed
            .hits
            .hits
            .into_iter()
            .map(|h| StoreHit {
                id: h.id,
                score: h.score,
                source: h.source,
            })
            .collect())
    }

    async fn batch_write(&self, items: &[BulkDocument]) -> Result<(), StoreError> {
        // NDJSON body: one action line and one source line per document.
        let mut body = String::new();
        for item in items {
            let action = serde_json::json!({
                "index": { "_index": item.collection, "_id": item.id }
            });
            body.push_str(&action.to_string());
            body.push('\n');
            body.push_str(&item.document.to_string());
            body.push('\n');
        }

        let url = self.endpoint("_bulk")?;
        debug!("bulk write of {} documents", items.len());

        let resp = self
            .client
            .post(url)
            .header("Content-Type", "application/x-ndjson")
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check_status(resp).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ElasticClient {
        ElasticClient::with_settings(&StoreSettings {
            url: server.uri(),
            connect_timeout_ms: 1000,
            request_timeout_ms: 2000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_query_parses_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tracks/_search"))
            .and(body_string_contains("multi_match"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": {
                    "hits": [
                        {"_id": "t1", "_score": 9.1, "_source": {"id": "t1", "title": "One"}},
                        {"_id": "t2", "_score": 7.0, "_source": {"id": "t2", "title": "Two"}}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let hits = client
            .query("tracks", "metallica", 10, &[("title", 3.0)])
            .await
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "t1");
        assert_eq!(hits[0].score, Some(9.1));
        assert_eq!(hits[1].source["title"], "Two");
    }

    #[tokio::test]
    async fn test_query_rejected_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tracks/_search"))
            .respond_with(ResponseTemplate::new(400).set_body_string("parse failure"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .query("tracks", "metallica", 10, &[("title", 3.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        // Port from a started-then-dropped mock server is no longer listening.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let client = ElasticClient::with_settings(&StoreSettings {
            url: uri,
            connect_timeout_ms: 500,
            request_timeout_ms: 500,
        })
        .unwrap();

        let err = client
            .query("tracks", "metallica", 10, &[("title", 3.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_batch_write_sends_ndjson() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_bulk"))
            .and(body_string_contains("\"_index\":\"tracks\""))
            .and(body_string_contains("\"_id\":\"t1\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "errors": false, "items": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let docs = vec![BulkDocument {
            collection: "tracks",
            id: "t1".to_string(),
            document: serde_json::json!({"id": "t1", "title": "One"}),
        }];
        client.batch_write(&docs).await.unwrap();
    }
}
