//! Gateway error taxonomy
//!
//! Every failure surfaces to the caller as one of these kinds with a
//! structured JSON body; no store error reaches a client uncategorized.

use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors returned by the gateway's public operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed caller input, rejected before any store call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document store could not be reached.
    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),

    /// The document store was reachable but rejected the operation.
    #[error("document store error: {0}")]
    Store(String),

    /// Unexpected failure caught at the boundary.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Stable machine-readable kind used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidArgument(_) => "invalid_argument",
            GatewayError::StoreUnavailable(_) => "store_unavailable",
            GatewayError::Store(_) => "store_error",
            GatewayError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            GatewayError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Store(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => GatewayError::StoreUnavailable(msg),
            StoreError::Rejected(msg) => GatewayError::Store(msg),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: GatewayError = StoreError::Unavailable("connect refused".to_string()).into();
        assert!(matches!(err, GatewayError::StoreUnavailable(_)));
        assert_eq!(err.kind(), "store_unavailable");

        let err: GatewayError = StoreError::Rejected("mapping conflict".to_string()).into();
        assert!(matches!(err, GatewayError::Store(_)));
        assert_eq!(err.kind(), "store_error");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::InvalidArgument("q".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::StoreUnavailable("x".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
