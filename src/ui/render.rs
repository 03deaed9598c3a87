//! Server-side HTML fragments for the search page.
//!
//! Markup is assembled with `format!`; every user- or store-provided string
//! goes through [`escape`].

use std::fmt::Write as _;

use crate::config::defaults;
use crate::store::Question;

/// Element id of the skeleton block shown while a search runs.
pub const LOADING_ID: &str = "results-loading";

/// Element id of the resolved results (or error) block.
pub const RESULTS_ID: &str = "results";

/// Removes the skeleton once the streamed results have arrived.
pub const REMOVE_PLACEHOLDER_SCRIPT: &str =
    "<script>document.getElementById(\"results-loading\")?.remove();</script>";

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Document head, title and search form. Leaves `<main>` open.
pub fn shell_start(query: Option<&str>, placeholder_rows: usize) -> String {
    let title = defaults::PAGE_TITLE;
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title}</title>\n",
            "<link rel=\"stylesheet\" href=\"/static/style.css\">\n",
            "<script src=\"/static/search.js\" defer></script>\n",
            "</head>\n<body>\n<main>\n",
            "<h1>{title}</h1>\n",
            "{form}\n",
            "<section id=\"search-output\" data-rows=\"{placeholder_rows}\">\n",
        ),
        title = title,
        placeholder_rows = placeholder_rows,
        form = search_box(query.unwrap_or_default()),
    )
}

/// Closes everything [`shell_start`] opened.
pub const fn shell_end() -> &'static str {
    "</section>\n</main>\n</body>\n</html>\n"
}

/// The search form. A plain GET form, so submitting navigates to `/?search=...`.
pub fn search_box(value: &str) -> String {
    format!(
        concat!(
            "<form id=\"search-form\" class=\"search\" method=\"get\" action=\"/\" role=\"search\">",
            "<input id=\"search-input\" type=\"search\" name=\"search\" value=\"{value}\" ",
            "placeholder=\"Search questions\" autocomplete=\"off\">",
            "<button type=\"submit\">Search</button>",
            "</form>",
        ),
        value = escape(value),
    )
}

/// Skeleton rows shown while the query is in flight.
pub fn loading(rows: usize) -> String {
    let mut out = format!("<div id=\"{LOADING_ID}\" class=\"results loading\" aria-busy=\"true\">");
    for _ in 0..rows {
        out.push_str(
            "<div class=\"skeleton-row\"><div class=\"skeleton line-lg\"></div><div class=\"skeleton line-sm\"></div></div>",
        );
    }
    out.push_str("</div>\n");
    out
}

/// One card per record: category badge, question heading, answer.
pub fn results(items: &[Question]) -> String {
    let mut out = format!("<div id=\"{RESULTS_ID}\" class=\"results\">");
    if items.is_empty() {
        out.push_str("<p class=\"empty\">No matching questions.</p>");
    }
    for item in items {
        let _ = write!(
            out,
            concat!(
                "<article class=\"card\">",
                "<p class=\"badge\">{}</p>",
                "<h2>{}</h2>",
                "<p>{}</p>",
                "</article>",
            ),
            escape(&item.category),
            escape(&item.question),
            escape(&item.answer),
        );
    }
    out.push_str("</div>\n");
    out
}

/// Rendered in place of results when the query fails.
pub fn error_panel(message: &str) -> String {
    format!(
        concat!(
            "<div id=\"{id}\" class=\"results error\" role=\"alert\">",
            "<p>Search failed. Please try again.</p>",
            "<p class=\"detail\">{message}</p>",
            "</div>\n",
        ),
        id = RESULTS_ID,
        message = escape(message),
    )
}
