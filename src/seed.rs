//! Seed routine: one-shot collection setup and dataset import
//!
//! 1. Declare the collection with its vectorizer and generative modules
//! 2. Fetch the public JSON dataset
//! 3. Bulk insert every record in one call
//!
//! Steps run sequentially. A failure in step 2 or 3 leaves the collection
//! created; nothing is rolled back.

use tracing::{info, warn};

use crate::store::{BatchSummary, Question, QuestionStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Vector store error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to fetch dataset from {url}: {source}")]
    DatasetFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Dataset server returned status {status} for {url}")]
    DatasetStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Dataset at {url} is not a JSON array of questions: {source}")]
    DatasetDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Bulk insert rejected {failed} of {submitted} objects (first error: {first})")]
    PartialInsert {
        submitted: usize,
        failed: usize,
        first: String,
    },
}

/// Outcome of a complete seed run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub collection: String,
    pub summary: BatchSummary,
}

/// Declare the collection on the store.
///
/// Not idempotent: an existing collection surfaces as the store's error.
pub async fn create_collection(store: &dyn QuestionStore) -> Result<(), SeedError> {
    store.create_collection().await?;
    info!("Collection {} created!", store.collection());
    Ok(())
}

/// Download the dataset and decode it into question records.
pub async fn fetch_dataset(http: &reqwest::Client, url: &str) -> Result<Vec<Question>, SeedError> {
    let fetch_err = |source| SeedError::DatasetFetch {
        url: url.to_string(),
        source,
    };

    let resp = http.get(url).send().await.map_err(fetch_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(SeedError::DatasetStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.bytes().await.map_err(fetch_err)?;
    let records: Vec<Question> =
        serde_json::from_slice(&body).map_err(|source| SeedError::DatasetDecode {
            url: url.to_string(),
            source,
        })?;
    info!(url = %url, records = records.len(), "Fetched dataset");
    Ok(records)
}

/// Fetch the dataset and insert it with a single bulk call.
pub async fn import_questions(
    store: &dyn QuestionStore,
    http: &reqwest::Client,
    dataset_url: &str,
) -> Result<BatchSummary, SeedError> {
    let records = fetch_dataset(http, dataset_url).await?;
    if records.is_empty() {
        warn!(url = %dataset_url, "Dataset is empty, nothing to insert");
    }

    let summary = store.insert_many(&records).await?;
    info!(collection = %store.collection(), "We just bulk inserted: {}", summary);

    if let Some(first) = summary.errors.first() {
        for e in &summary.errors {
            warn!(index = e.index, error = %e.message, "Object rejected by store");
        }
        return Err(SeedError::PartialInsert {
            submitted: summary.submitted,
            failed: summary.errors.len(),
            first: first.message.clone(),
        });
    }
    Ok(summary)
}

/// Create the collection, then import the dataset.
pub async fn run(
    store: &dyn QuestionStore,
    http: &reqwest::Client,
    dataset_url: &str,
) -> Result<SeedReport, SeedError> {
    create_collection(store).await?;
    let summary = import_questions(store, http, dataset_url).await?;
    Ok(SeedReport {
        collection: store.collection().to_string(),
        summary,
    })
}
