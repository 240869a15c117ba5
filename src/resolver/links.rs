//! URL extraction from free text
//!
//! Only URLs with an explicit `scheme://` are recognised. Revision bodies
//! and resource pages come with escaped newlines (`\n`), and the matcher
//! reads the `n` as the start of the scheme; [`extract_links`] strips it
//! again from any match starting with `nhttp`.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[A-Za-z][A-Za-z0-9+.\-]*://[^\s<>"'`{}|\\^\[\]]+"#)
        .expect("URL pattern must compile")
});

/// Characters that end a sentence rather than a URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Finds every URL in `text`, in order of appearance
///
/// # Examples
///
/// ```
/// use piazza_api::resolver::extract_links;
///
/// let links = extract_links(r#"See <a href="https://fn.lc/duck">Duck</a>."#);
/// assert_eq!(links, vec!["https://fn.lc/duck"]);
///
/// assert_eq!(extract_links("a\\nhttp://x.com"), vec!["http://x.com"]);
/// ```
pub fn extract_links(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| trim_trailing(m.as_str()))
        .filter(|link| !link.ends_with("://"))
        .map(|link| normalize_link(link).to_string())
        .collect()
}

/// Drops the `n` an escaped newline leaves in front of `http`
pub fn normalize_link(link: &str) -> &str {
    if link.starts_with("nhttp") {
        &link[1..]
    } else {
        link
    }
}

fn trim_trailing(candidate: &str) -> &str {
    let mut link = candidate.trim_end_matches(TRAILING_PUNCTUATION);
    while link.ends_with(')') && link.matches('(').count() < link.matches(')').count() {
        link = link[..link.len() - 1].trim_end_matches(TRAILING_PUNCTUATION);
    }
    link
}
