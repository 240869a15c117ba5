use crate::{PiazzaError, Result};
use url::Url;

/// Scheme of the synthetic addresses: `piazza://classID/contentID`
pub const PIAZZA_SCHEME: &str = "piazza";

/// What a synthetic address points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// `piazza://` - the classes the user is enrolled in
    Root,
    /// `piazza://<class>` - resources and threads of one class
    Class { class_id: String },
    /// `piazza://<class>/<post>` - one thread with all its replies
    Post { class_id: String, post_id: String },
}

impl Address {
    /// Parses a synthetic address
    ///
    /// Only the scheme is checked here; whether the class is known is up to
    /// the resolver.
    ///
    /// # Examples
    ///
    /// ```
    /// use piazza_api::resolver::Address;
    ///
    /// assert_eq!(Address::parse("piazza://").unwrap(), Address::Root);
    /// assert_eq!(
    ///     Address::parse("piazza://abc/def").unwrap(),
    ///     Address::Post { class_id: "abc".to_string(), post_id: "def".to_string() }
    /// );
    /// ```
    pub fn parse(address: &str) -> Result<Self> {
        // The scheme decides before anything else; `https://` is not a
        // valid URL but is still the wrong scheme.
        let scheme = scheme_of(address).ok_or(PiazzaError::Address(
            url::ParseError::RelativeUrlWithoutBase,
        ))?;
        if !scheme.eq_ignore_ascii_case(PIAZZA_SCHEME) {
            return Err(PiazzaError::Scheme {
                expected: PIAZZA_SCHEME.to_string(),
                found: scheme.to_ascii_lowercase(),
            });
        }

        let url = Url::parse(address)?;

        let host = url.host_str().unwrap_or_default();
        let path = url.path();

        if path.len() <= 1 {
            if host.is_empty() {
                return Ok(Self::Root);
            }
            return Ok(Self::Class {
                class_id: host.to_string(),
            });
        }

        let post_id = path.strip_prefix('/').unwrap_or(path);
        Ok(Self::Post {
            class_id: host.to_string(),
            post_id: post_id.to_string(),
        })
    }
}

/// The scheme of `address`: a letter followed by letters, digits, `+`, `-`
/// or `.`, ending at the first `:`
fn scheme_of(address: &str) -> Option<&str> {
    let (scheme, _) = address.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().map_or(false, |c| c.is_ascii_alphabetic());
    if starts_with_letter && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
        Some(scheme)
    } else {
        None
    }
}

/// Address of a class
pub fn class_address(class_id: &str) -> String {
    format!("{}://{}", PIAZZA_SCHEME, class_id)
}

/// Address of a thread within a class
pub fn post_address(class_id: &str, post_id: &str) -> String {
    format!("{}://{}/{}", PIAZZA_SCHEME, class_id, post_id)
}
