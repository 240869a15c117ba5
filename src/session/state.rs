use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;
use url::Url;

/// Authentication state shared by every request of one session
///
/// The cookie jar is replaced wholesale on login. The `aid` is written by
/// the `user.status` call and read by every RPC call made after it.
#[derive(Debug, Clone)]
pub struct SessionState {
    jar: Arc<Jar>,
    aid: Option<String>,
}

impl SessionState {
    /// Creates an empty state with no cookies and no session identifier
    pub fn new() -> Self {
        Self {
            jar: Arc::new(Jar::default()),
            aid: None,
        }
    }

    /// The cookie jar attached to the HTTP client
    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Drops every cookie and the session identifier
    pub fn reset(&mut self) {
        self.jar = Arc::new(Jar::default());
        self.aid = None;
    }

    /// The session identifier, once discovered
    pub fn aid(&self) -> Option<&str> {
        self.aid.as_deref()
    }

    /// Stores the latest session identifier; an empty value clears it
    pub fn set_aid(&mut self, aid: impl Into<String>) {
        let aid = aid.into();
        self.aid = if aid.is_empty() { None } else { Some(aid) };
    }

    /// Returns the `Cookie` header value the jar would send to `url`
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
