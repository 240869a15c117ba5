//! HTTP transport
//!
//! Builds the `reqwest` client every session request goes through and
//! wraps sends so failures carry the URL they happened on.

use crate::config::HttpConfig;
use crate::{PiazzaError, Result};
use reqwest::cookie::Jar;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A fetched page body along with where it finally came from
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// True when the service answered exactly 200
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Converts a non-200 page into a transport error
    pub fn require_ok(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(PiazzaError::Status {
                url: self.url.to_string(),
                status: self.status.as_u16(),
            })
        }
    }
}

/// Builds an HTTP client bound to `jar`
///
/// Every response's `Set-Cookie` headers land in the jar and every request
/// carries the jar's cookies, so the client is only valid for one login.
///
/// # Arguments
///
/// * `config` - The HTTP configuration
/// * `jar` - Cookie jar of the current session
pub fn build_http_client(config: &HttpConfig, jar: Arc<Jar>) -> std::result::Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .cookie_provider(jar)
        .gzip(true)
        .brotli(true);

    if config.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_secs));
    }
    if config.connect_timeout_secs > 0 {
        builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
    }

    builder.build()
}

/// Sends `request` and reads the whole body, whatever the status
pub async fn send(request: RequestBuilder, url: &str) -> Result<FetchedPage> {
    let response = request.send().await.map_err(|source| PiazzaError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    let final_url = response.url().clone();

    // Bytes rather than `text()`: the body is passed on as served, not
    // transcoded according to the Content-Type charset.
    let bytes = response.bytes().await.map_err(|source| PiazzaError::Http {
        url: url.to_string(),
        source,
    })?;
    let body = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FetchedPage {
        url: final_url,
        status,
        body,
    })
}
