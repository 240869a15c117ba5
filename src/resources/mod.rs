//! Class resources scraped from the resource page
//!
//! Resources (lecture notes, links, homework) are not exposed through the
//! RPC endpoint. The class resource page embeds them as a JSON array inside
//! an inline script, which this module extracts and decodes.

mod extract;

pub use extract::{extract_resource_json, RESOURCE_DATA_MARKER, STATEMENT_TERMINATOR};

use crate::rpc::null_as_default;
use crate::session::Session;
use crate::{PiazzaError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One class resource
///
/// ```json
/// {
///     "content": "https://www.facebook.com/notes/facebook-engineering/the-full-stack-part-i/461505383919",
///     "subject": "Reading Sep 8: The Full Stack Part 1",
///     "created": "2016-09-06T20:32:57Z",
///     "id": "isrxno834nx6x2",
///     "config": {"resource_type": "link", "section": "general", "date": ""}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub config: ResourceConfig,
}

impl Resource {
    /// Creation time, if `created` is a valid RFC 3339 timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Per-resource display settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub resource_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub section: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

/// A fetched resource page, kept whole
#[derive(Debug, Clone)]
pub struct ResourcePage {
    /// Requested URL
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Raw page body
    pub body: String,
}

impl ResourcePage {
    /// Decodes the resources embedded in the page
    pub fn resources(&self) -> Result<Vec<Resource>> {
        parse_resources(&self.body, &self.url)
    }
}

/// Decodes the resource array embedded in `html`
///
/// A page without the marker yields an empty body, which fails to decode;
/// there is no silent empty-list fallback.
pub fn parse_resources(html: &str, context: &str) -> Result<Vec<Resource>> {
    let body = extract_resource_json(html);
    serde_json::from_str(&body).map_err(|source| PiazzaError::Decode {
        context: format!("resource data of {}", context),
        source,
    })
}

/// Fetches a resource page without judging its status
pub async fn fetch_resource_page(session: &Session, url: &str) -> Result<ResourcePage> {
    let page = session.get_raw(url).await?;
    Ok(ResourcePage {
        url: url.to_string(),
        status: page.status.as_u16(),
        body: page.body,
    })
}

/// Fetches a class resource page and decodes its resources
///
/// # Errors
///
/// * `PiazzaError::Status` / `PiazzaError::Http` - the page could not be fetched
/// * `PiazzaError::Decode` - the page has no resource data or it is malformed
pub async fn fetch_resources(session: &Session, url: &str) -> Result<Vec<Resource>> {
    let body = session.get_page(url).await?;
    let resources = parse_resources(&body, url)?;
    tracing::debug!("Found {} resources on {}", resources.len(), url);
    Ok(resources)
}
