use std::fmt::Write;

/// Renders one anchor line per URL
///
/// Each line is `<a href="URL">URL</a>` followed by a newline. URLs are
/// written as-is.
pub fn urls_to_html<I, S>(urls: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut html = String::new();
    for url in urls {
        let url = url.as_ref();
        let _ = writeln!(html, "<a href=\"{}\">{}</a>", url, url);
    }
    html
}
