//! Vectorino: semantic Jeopardy question search
//!
//! A small web front-end over a hosted Weaviate collection.
//!
//! ## Architecture
//!
//! - **Store**: connection lifecycle and the REST/GraphQL calls to Weaviate
//! - **Seed**: one-shot collection creation and dataset import
//! - **UI**: page states and HTML rendering, with the query run as a cancellable task
//! - **API**: Axum routes for the page, the results fragment and the JSON API

pub mod api;
pub mod config;
pub mod seed;
pub mod store;
pub mod ui;

pub use config::{AppConfig, Credentials};
pub use store::{Connection, Question, QuestionStore, StoreError, WeaviateStore};
