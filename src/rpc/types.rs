//! Request and response models for the RPC endpoint
//!
//! Only the fields this crate reads are modelled. Every field defaults, as
//! the service omits whatever does not apply to a given object, and an
//! explicit `null` reads as the default too.

use crate::{PiazzaError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope of every RPC request
#[derive(Debug, Serialize)]
pub struct ApiRequest<'a, P> {
    pub method: &'a str,
    pub params: &'a P,
}

/// Envelope of every RPC response
///
/// `error` is the service's own verdict and is independent of the HTTP
/// status; a 200 response can still carry one.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<Value>,
    pub aid: Option<String>,
}

impl<T> ApiResponse<T> {
    /// The service-side error message, if the response carries one
    pub fn service_error(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(message)) if message.is_empty() => None,
            Some(Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Unwraps the result, turning service errors into `PiazzaError::Service`
    pub fn into_result(self, method: &str) -> Result<T> {
        if let Some(message) = self.service_error() {
            return Err(PiazzaError::Service {
                method: method.to_string(),
                message,
            });
        }

        self.result.ok_or_else(|| PiazzaError::MissingResult {
            method: method.to_string(),
        })
    }
}

/// Reads `null` as `T::default()`
///
/// `#[serde(default)]` only covers absent keys; the service also sends
/// `null` for fields that do not apply.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Email preferences keyed by class id, plus one `career` entry
///
/// Entries are kept as raw JSON so a rewrite sends back every field the
/// service gave us.
pub type EmailPrefs = BTreeMap<String, Value>;

/// `result` of `user.status`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub networks: Vec<Network>,
    #[serde(deserialize_with = "null_as_default")]
    pub config: UserConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub last_network: String,
}

/// The part of the user's config this crate touches
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub email_prefs: EmailPrefs,
}

/// A class (the service calls them networks)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Network {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub course_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub term: String,
    #[serde(deserialize_with = "null_as_default")]
    pub school: String,
    #[serde(deserialize_with = "null_as_default")]
    pub school_ext: String,
    #[serde(deserialize_with = "null_as_default")]
    pub school_short: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_count: i64,
}

impl Network {
    /// Page listing the class resources
    ///
    /// The service builds it from the school domain, term and course number,
    /// each squashed to lowercase without whitespace.
    pub fn resource_url(&self, site_url: &str) -> String {
        format!(
            "{}/{}/{}/{}/resources",
            site_url.trim_end_matches('/'),
            squash(&self.school_ext),
            squash(&self.term),
            squash(&self.course_number)
        )
    }
}

fn squash(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `result` of `network.get_my_feed`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Feed {
    #[serde(deserialize_with = "null_as_default")]
    pub feed: Vec<FeedEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub more: bool,
}

/// One top-level thread of a class feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nr: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unique_views: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub no_answer_followup: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub updated: String,
}

/// A post with its revision history and nested replies
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nr: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<Revision>,
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<Post>,
}

/// One version of a post's text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Revision {
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    pub uid: Option<String>,
}

/// Params of `network.get_my_feed`
#[derive(Debug, Serialize)]
pub struct FeedParams<'a> {
    pub nid: &'a str,
}

/// Params of `content.get`
#[derive(Debug, Serialize)]
pub struct ContentParams<'a> {
    pub cid: &'a str,
    pub nid: &'a str,
}
