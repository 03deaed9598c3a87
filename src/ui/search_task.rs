//! A single search run as an explicit, cancellable task.
//!
//! The task is spawned when a page view carries a query and completes with
//! a [`SearchView`]. Dropping the `SearchTask` (for example because the
//! response stream was dropped on client disconnect) cancels the in-flight
//! store call.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, warn};

use super::SearchView;
use crate::store::{Question, QuestionStore, StoreError};

pub struct SearchTask {
    handle: JoinHandle<Result<Vec<Question>, StoreError>>,
    guard: DropGuard,
}

impl SearchTask {
    /// Start the query on the runtime. Returns immediately.
    pub fn spawn(store: Arc<dyn QuestionStore>, query: String) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {
                    debug!(query = %query, "Search cancelled before completion");
                    Err(StoreError::Cancelled)
                }
                result = store.near_text(&query) => result,
            }
        });

        Self {
            handle,
            guard: token.drop_guard(),
        }
    }

    /// Cancel without waiting for the outcome.
    pub fn cancel(self) {
        drop(self);
    }

    /// Wait for the query and map its outcome to a view state.
    pub async fn finish(self) -> SearchView {
        let Self { handle, guard } = self;
        let outcome = handle.await;
        let _ = guard.disarm();

        match outcome {
            Ok(Ok(items)) => SearchView::Loaded(items),
            Ok(Err(e)) => {
                warn!(error = %e, "Search query failed");
                SearchView::Errored(e.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Search task aborted");
                SearchView::Errored("search task aborted".to_string())
            }
        }
    }
}
