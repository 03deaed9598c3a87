//! Weaviate Client: HTTP client for the hosted vector store
//!
//! Wraps the four REST endpoints this application needs: readiness, schema
//! creation, batch object import and GraphQL `Get` queries.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::error::StoreError;
use super::types::{BatchObjectError, BatchSummary, Question};
use crate::config::{defaults, Credentials};

/// Collection (Weaviate class) definition sent to `POST /v1/schema`.
#[derive(Debug, Clone)]
pub struct CollectionDefinition {
    pub name: String,
    pub vectorizer: String,
    pub generative: String,
}

impl CollectionDefinition {
    fn to_json(&self) -> serde_json::Value {
        let mut module_config = serde_json::Map::new();
        module_config.insert(self.vectorizer.clone(), serde_json::json!({}));
        if !self.generative.is_empty() {
            module_config.insert(self.generative.clone(), serde_json::json!({}));
        }
        serde_json::json!({
            "class": self.name,
            "vectorizer": self.vectorizer,
            "moduleConfig": module_config,
        })
    }
}

/// Authenticated HTTP client bound to one Weaviate cluster.
#[derive(Debug, Clone)]
pub struct WeaviateClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeaviateClient {
    /// Build an authenticated client and verify the cluster reports ready.
    ///
    /// The cluster key is sent as a bearer token on every request; the
    /// OpenAI key is forwarded so the cluster can vectorize on our behalf.
    pub async fn connect(
        credentials: &Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.api_key))
            .map_err(|_| StoreError::InvalidHeader("Authorization"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut openai = HeaderValue::from_str(&credentials.openai_api_key)
            .map_err(|_| StoreError::InvalidHeader(defaults::OPENAI_KEY_HEADER))?;
        openai.set_sensitive(true);
        headers.insert(
            HeaderName::from_static("x-openai-api-key"),
            openai,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }

        let client = Self {
            http: builder.build()?,
            base_url: credentials.endpoint.trim_end_matches('/').to_string(),
        };

        if !client.is_ready().await? {
            return Err(StoreError::NotReady(client.base_url));
        }
        debug!(endpoint = %client.base_url, "Vector store reports ready");
        Ok(client)
    }

    /// `GET /v1/.well-known/ready`
    pub async fn is_ready(&self) -> Result<bool, StoreError> {
        let resp = self
            .http
            .get(format!("{}/v1/.well-known/ready", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// `POST /v1/schema`: fails with the service's status if the class exists.
    pub async fn create_class(&self, definition: &CollectionDefinition) -> Result<(), StoreError> {
        let resp = self
            .http
            .post(format!("{}/v1/schema", self.base_url))
            .json(&definition.to_json())
            .send()
            .await?;
        check_status(resp).await.map(drop)
    }

    /// `POST /v1/batch/objects`: one call carrying every record.
    pub async fn batch_objects(
        &self,
        class: &str,
        records: &[Question],
    ) -> Result<BatchSummary, StoreError> {
        let objects: Vec<serde_json::Value> = records
            .iter()
            .map(|r| serde_json::json!({ "class": class, "properties": r }))
            .collect();

        let resp = self
            .http
            .post(format!("{}/v1/batch/objects", self.base_url))
            .json(&serde_json::json!({ "objects": objects }))
            .send()
            .await?;
        let body = check_status(resp).await?;

        let results: Vec<BatchObjectResponse> = serde_json::from_str(&body)?;
        summarize_batch(records.len(), results)
    }

    /// `POST /v1/graphql`: returns the `data` member, or the error messages.
    pub async fn graphql(&self, query: &str) -> Result<serde_json::Value, StoreError> {
        let resp = self
            .http
            .post(format!("{}/v1/graphql", self.base_url))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let body = check_status(resp).await?;

        let parsed: GraphQlResponse = serde_json::from_str(&body)?;
        if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
            return Err(StoreError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        Ok(parsed.data.unwrap_or(serde_json::Value::Null))
    }

    /// Get base URL for logging
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn check_status(resp: reqwest::Response) -> Result<String, StoreError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(StoreError::Status { status, body })
    }
}

// ============================================================================
// Query building / response parsing
// ============================================================================

/// Build the GraphQL `Get` query for a nearText search.
///
/// The concept is embedded as a JSON string literal, which is also a valid
/// GraphQL string literal.
pub fn near_text_query(collection: &str, concept: &str, limit: usize) -> String {
    let literal = serde_json::Value::String(concept.to_string());
    format!(
        "{{ Get {{ {collection}(nearText: {{concepts: [{literal}]}}, limit: {limit}) {{ {} }} }} }}",
        defaults::QUESTION_PROPERTIES.join(" ")
    )
}

/// Extract `Get.<collection>` from a GraphQL `data` member.
///
/// A `null` or absent array means no matches.
pub fn parse_get_response(
    data: &serde_json::Value,
    collection: &str,
) -> Result<Vec<Question>, StoreError> {
    match data.get("Get").and_then(|g| g.get(collection)) {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| Question::deserialize(item).map_err(StoreError::from))
            .collect(),
        Some(other) => Err(StoreError::Decode(format!(
            "expected array under Get.{collection}, got {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct BatchObjectResponse {
    id: Option<String>,
    result: Option<BatchObjectResult>,
}

#[derive(Debug, Deserialize)]
struct BatchObjectResult {
    errors: Option<BatchErrorList>,
}

#[derive(Debug, Deserialize)]
struct BatchErrorList {
    #[serde(default)]
    error: Vec<GraphQlError>,
}

/// The service answers with one entry per submitted object, in order.
fn summarize_batch(
    submitted: usize,
    results: Vec<BatchObjectResponse>,
) -> Result<BatchSummary, StoreError> {
    if results.len() != submitted {
        return Err(StoreError::Decode(format!(
            "batch reply has {} entries for {submitted} submitted objects",
            results.len()
        )));
    }

    let mut summary = BatchSummary {
        submitted,
        ..BatchSummary::default()
    };

    for (index, obj) in results.into_iter().enumerate() {
        let messages: Vec<String> = obj
            .result
            .and_then(|r| r.errors)
            .map(|e| e.error.into_iter().map(|m| m.message).collect())
            .unwrap_or_default();

        if messages.is_empty() {
            if let Some(id) = obj.id {
                summary.uuids.push(id);
            }
        } else {
            summary.errors.push(BatchObjectError {
                index,
                message: messages.join("; "),
            });
        }
    }

    Ok(summary)
}
