//! Search UI - page states and rendering
//!
//! Each page view moves through `NoQuery -> Loading -> Loaded | Errored`.
//! The URL's `search` parameter is the only source of truth for the query.

pub mod render;
mod search_task;

pub use search_task::SearchTask;

use crate::store::Question;

/// Per-page-view state of the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// No `search` parameter: only the search box is shown
    NoQuery,
    /// Query in flight: skeleton rows
    Loading { rows: usize },
    /// Query resolved (possibly with zero records)
    Loaded(Vec<Question>),
    /// Query failed; carries a displayable message
    Errored(String),
}

impl SearchView {
    /// HTML for the results area in this state.
    pub fn render(&self) -> String {
        match self {
            Self::NoQuery => String::new(),
            Self::Loading { rows } => render::loading(*rows),
            Self::Loaded(items) => render::results(items),
            Self::Errored(message) => render::error_panel(message),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Errored(_))
    }
}

/// `None` when the `search` parameter is absent or blank; otherwise the
/// parameter exactly as given.
pub fn normalize_query(raw: Option<String>) -> Option<String> {
    raw.filter(|q| !q.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some(String::new())), None);
        assert_eq!(normalize_query(Some("   ".into())), None);
        assert_eq!(normalize_query(Some(" apollo ".into())), Some(" apollo ".into()));
    }

    #[test]
    fn test_no_query_renders_nothing() {
        assert!(SearchView::NoQuery.render().is_empty());
    }

    #[test]
    fn test_loading_renders_placeholder() {
        let html = SearchView::Loading { rows: 3 }.render();
        assert!(html.contains(render::LOADING_ID));
        assert_eq!(html.matches("skeleton-row").count(), 3);
    }

    #[test]
    fn test_errored_renders_alert() {
        let view = SearchView::Errored("store down".into());
        assert!(view.is_error());
        let html = view.render();
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("store down"));
    }
}
