//! Connection lifecycle for the remote vector store.
//!
//! A `Connection` is created once at process start and owned by whoever
//! needs the store (the HTTP server state or the seed routine). The
//! underlying client is established on first use and reused until
//! [`Connection::close`] is called.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

use super::error::StoreError;
use super::weaviate::WeaviateClient;
use crate::config::Credentials;

pub struct Connection {
    credentials: Credentials,
    timeout: Option<Duration>,
    /// Held across the connect await so concurrent first uses share one client.
    client: Mutex<Option<Arc<WeaviateClient>>>,
    connects: AtomicU64,
}

impl Connection {
    /// Record credentials. Performs no I/O.
    pub fn new(credentials: Credentials, timeout: Option<Duration>) -> Self {
        Self {
            credentials,
            timeout,
            client: Mutex::new(None),
            connects: AtomicU64::new(0),
        }
    }

    /// Return the established client, connecting on first use.
    ///
    /// Every call between two `close()`s returns the same `Arc`.
    pub async fn client(&self) -> Result<Arc<WeaviateClient>, StoreError> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(WeaviateClient::connect(&self.credentials, self.timeout).await?);
        let n = self.connects.fetch_add(1, Ordering::Relaxed) + 1;
        info!(endpoint = %client.base_url(), connects = n, "Connected to vector store");
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Whether a client is currently established.
    pub async fn is_connected(&self) -> bool {
        self.client.lock().await.is_some()
    }

    /// Number of successful connects over this value's lifetime.
    pub fn connect_count(&self) -> u64 {
        self.connects.load(Ordering::Relaxed)
    }

    /// Drop the established client. The next `client()` call reconnects.
    pub async fn close(&self) {
        if self.client.lock().await.take().is_some() {
            info!(endpoint = %self.credentials.endpoint, "Vector store connection closed");
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.credentials.endpoint
    }
}
