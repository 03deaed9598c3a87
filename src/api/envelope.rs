//! JSON shapes for `/api/v1`.
//!
//! Search results go out as `{ "data": [...], "meta": {...} }`. Failures go
//! out as `{ "error": { "code", "message" }, "meta": {...} }`, with the code
//! taken from [`StoreError::code`] when the vector store is at fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::store::StoreError;

const API_VERSION: &str = "1";

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
    pub version: &'static str,
    /// Number of records in `data`; absent on errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ResponseMeta {
    fn now(count: Option<usize>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: API_VERSION,
            count,
        }
    }
}

/// A successful list response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Vec<T>,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let meta = ResponseMeta::now(Some(data.len()));
        Self { data, meta }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Why a JSON API request failed.
#[derive(Debug)]
pub enum ApiError {
    /// `?search=` absent or blank
    MissingQuery,
    /// The vector store call failed
    Store(StoreError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingQuery => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            Self::MissingQuery => ErrorDetail {
                code: "BAD_REQUEST",
                message: "query parameter 'search' is required".to_string(),
            },
            Self::Store(e) => ErrorDetail {
                code: e.code(),
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
    meta: ResponseMeta,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.detail(),
            meta: ResponseMeta::now(None),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_response_carries_count() {
        let resp = ApiResponse::new(vec!["a", "b"]).into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let v = body_json(resp).await;
        assert_eq!(v["data"], serde_json::json!(["a", "b"]));
        assert_eq!(v["meta"]["version"], "1");
        assert_eq!(v["meta"]["count"], 2);
    }

    #[tokio::test]
    async fn test_store_error_maps_to_bad_gateway() {
        let err = ApiError::from(StoreError::GraphQl(vec!["upstream down".into()]));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "STORE_ERROR");
        assert_eq!(v["error"]["message"], "Query failed: upstream down");
        assert!(v["meta"]["timestamp"].is_string());
        assert!(v["meta"].get("count").is_none());
    }

    #[test]
    fn test_missing_query_is_bad_request() {
        assert_eq!(ApiError::MissingQuery.status(), StatusCode::BAD_REQUEST);
    }
}
