//! Store module - data access for the remote vector database
//!
//! ## QuestionStore trait
//!
//! The `QuestionStore` trait abstracts the three operations the application
//! performs against its collection so the search page and the seed routine
//! can run against the hosted store or a test double:
//! - `WeaviateStore`: Weaviate Cloud over REST/GraphQL
//! - fakes in the test suites

mod connection;
mod error;
mod types;
pub mod weaviate;

pub use connection::Connection;
pub use error::StoreError;
pub use types::{BatchObjectError, BatchSummary, Question};
pub use weaviate::{CollectionDefinition, WeaviateClient};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::config::StoreConfig;

/// Trait for question store backends
///
/// Implementations must be `Send + Sync`; the server shares one store across
/// every request task.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Similarity search; at most the configured limit, in service order.
    async fn near_text(&self, query: &str) -> Result<Vec<Question>, StoreError>;

    /// Declare the collection with its vectorizer and generative modules.
    async fn create_collection(&self) -> Result<(), StoreError>;

    /// Insert every record in a single call.
    async fn insert_many(&self, records: &[Question]) -> Result<BatchSummary, StoreError>;

    /// Check if the backend is reachable and ready
    async fn is_ready(&self) -> bool;

    /// Name of the collection this store reads and writes
    fn collection(&self) -> &str;

    /// Get the store name for logging and health checks
    fn store_name(&self) -> &'static str;
}

/// `QuestionStore` backed by a Weaviate cluster.
pub struct WeaviateStore {
    connection: Arc<Connection>,
    settings: StoreConfig,
}

impl WeaviateStore {
    pub fn new(connection: Arc<Connection>, settings: StoreConfig) -> Self {
        Self {
            connection,
            settings,
        }
    }

    fn definition(&self) -> CollectionDefinition {
        CollectionDefinition {
            name: self.settings.collection.clone(),
            vectorizer: self.settings.vectorizer.clone(),
            generative: self.settings.generative.clone(),
        }
    }
}

#[async_trait]
impl QuestionStore for WeaviateStore {
    async fn near_text(&self, query: &str) -> Result<Vec<Question>, StoreError> {
        let client = self.connection.client().await?;
        let collection = &self.settings.collection;
        let limit = self.settings.result_limit;

        let gql = weaviate::near_text_query(collection, query, limit);
        let data = client.graphql(&gql).await?;
        let mut items = weaviate::parse_get_response(&data, collection)?;
        items.truncate(limit);

        debug!(query = %query, results = items.len(), "nearText query complete");
        Ok(items)
    }

    async fn create_collection(&self) -> Result<(), StoreError> {
        let client = self.connection.client().await?;
        client.create_class(&self.definition()).await
    }

    async fn insert_many(&self, records: &[Question]) -> Result<BatchSummary, StoreError> {
        let client = self.connection.client().await?;
        client
            .batch_objects(&self.settings.collection, records)
            .await
    }

    async fn is_ready(&self) -> bool {
        match self.connection.client().await {
            Ok(client) => client.is_ready().await.unwrap_or(false),
            Err(_) => false,
        }
    }

    fn collection(&self) -> &str {
        &self.settings.collection
    }

    fn store_name(&self) -> &'static str {
        "Weaviate"
    }
}
