//! Server-rendered search page
//!
//! With a query present the response is streamed in two chunks: the shell
//! plus skeleton rows first, then the resolved results once the search task
//! completes. The task is tied to the response body, so a client that goes
//! away cancels the store call.

use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use futures::StreamExt;
use std::convert::Infallible;
use std::sync::Arc;

use super::handlers::{AppState, SearchParams};
use crate::ui::{self, render, SearchTask, SearchView};

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// GET /
pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = ui::normalize_query(params.search);
    let shell = render::shell_start(query.as_deref(), state.ui.placeholder_rows);

    let Some(query) = query else {
        return Html(format!("{shell}{}", render::shell_end())).into_response();
    };

    let task = SearchTask::spawn(Arc::clone(&state.store), query);
    let placeholder = SearchView::Loading {
        rows: state.ui.placeholder_rows,
    };

    let head = Bytes::from(format!("{shell}{}", placeholder.render()));
    let tail = async move {
        let view = task.finish().await;
        Ok::<_, Infallible>(Bytes::from(format!(
            "{}{}{}",
            view.render(),
            render::REMOVE_PLACEHOLDER_SCRIPT,
            render::shell_end()
        )))
    };

    let stream = futures::stream::once(async move { Ok::<_, Infallible>(head) })
        .chain(futures::stream::once(tail));

    (
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        Body::from_stream(stream),
    )
        .into_response()
}

/// GET /results: results fragment only, swapped in by `search.js`.
pub async fn results_fragment(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let view = match ui::normalize_query(params.search) {
        None => SearchView::NoQuery,
        Some(query) => SearchTask::spawn(Arc::clone(&state.store), query).finish().await,
    };
    Html(view.render()).into_response()
}
