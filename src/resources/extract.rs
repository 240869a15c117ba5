//! Marker search over inline scripts
//!
//! The resource page embeds its data as a JavaScript assignment. There is no
//! structured endpoint for it, so this is a plain text search between the
//! assignment marker and the end of the statement, and it breaks whenever
//! the service changes how the page is rendered.

use scraper::{Html, Selector};

/// Text that precedes the resource array in the page script
pub const RESOURCE_DATA_MARKER: &str = "this.resource_data        = ";

/// End of the assignment statement
pub const STATEMENT_TERMINATOR: &str = ";\n";

/// Returns the JSON text assigned to `this.resource_data`
///
/// Every `<script>` is scanned and the last one containing the marker exactly
/// once wins. Returns an empty string when no script matches.
pub fn extract_resource_json(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(script_selector) = Selector::parse("script") else {
        return String::new();
    };

    let mut body = String::new();
    for script in document.select(&script_selector) {
        let text = script.text().collect::<String>();
        let parts: Vec<&str> = text.split(RESOURCE_DATA_MARKER).collect();
        if parts.len() != 2 {
            continue;
        }
        body = parts[1]
            .split(STATEMENT_TERMINATOR)
            .next()
            .unwrap_or_default()
            .to_string();
    }
    body
}
