//! RPC client for the service's internal API
//!
//! Every call is a POST of `{"method": ..., "params": ...}` to the API
//! endpoint with `?method=<name>` in the query, plus `&aid=<id>` once the
//! session identifier has been discovered. Authentication is carried by
//! the session's cookies only.

use super::types::{
    ApiRequest, ApiResponse, ContentParams, Feed, FeedParams, Post, UserStatus,
};
use crate::config::Config;
use crate::session::{send, Session};
use crate::{PiazzaError, Result};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Content type of every API request
pub const API_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Method returning the user's profile, classes and session identifier
pub const USER_STATUS_METHOD: &str = "user.status";

/// Method listing the threads of one class
pub const FEED_METHOD: &str = "network.get_my_feed";

/// Method returning one thread with all its replies
pub const CONTENT_METHOD: &str = "content.get";

/// Client for the RPC endpoint, bound to one session
#[derive(Debug)]
pub struct RpcClient {
    session: Session,
}

impl RpcClient {
    /// Wraps an existing session
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Creates a session from `config` and logs in
    ///
    /// # Example
    ///
    /// ```no_run
    /// use piazza_api::{Config, RpcClient};
    ///
    /// # async fn example() -> piazza_api::Result<()> {
    /// let mut client = RpcClient::connect(Config::default(), "me@example.com", "secret").await?;
    /// let status = client.user_status().await?;
    /// println!("Enrolled in {} classes", status.networks.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: Config, email: &str, password: &str) -> Result<Self> {
        let mut session = Session::new(config)?;
        session.login(email, password).await?;
        Ok(Self::new(session))
    }

    /// Logs in again, replacing cookies and session identifier
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.session.login(email, password).await
    }

    /// The underlying session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the underlying session
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Unwraps the session
    pub fn into_session(self) -> Session {
        self.session
    }

    /// URL a call to `method` is sent to
    pub fn endpoint_url(&self, method: &str) -> Result<Url> {
        let mut url = Url::parse(&self.session.config().service.api_endpoint)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("method", method);
            if let Some(aid) = self.session.state().aid() {
                query.append_pair("aid", aid);
            }
        }
        Ok(url)
    }

    /// Calls `method` and returns the raw response body
    ///
    /// The body is not decoded; use [`RpcClient::call_into`] for that.
    ///
    /// # Errors
    ///
    /// * `PiazzaError::Status` - the endpoint answered anything but 200
    /// * `PiazzaError::Http` - the request could not be sent or read
    pub async fn call<P: Serialize>(&self, method: &str, params: &P) -> Result<String> {
        if method.trim().is_empty() {
            return Err(PiazzaError::InvalidMethod(method.to_string()));
        }

        let url = self.endpoint_url(method)?;
        let body = serde_json::to_vec(&ApiRequest { method, params }).map_err(|source| {
            PiazzaError::Encode {
                method: method.to_string(),
                source,
            }
        })?;

        tracing::debug!("RPC {} -> {}", method, url);
        let request = self
            .session
            .http()
            .post(url.clone())
            .header(CONTENT_TYPE, API_CONTENT_TYPE)
            .body(body);

        let response = send(request, url.as_str()).await?.require_ok()?;
        Ok(response.body)
    }

    /// Calls `method` and decodes the response body into `T`
    ///
    /// Succeeds as soon as the body decodes, even if it carries a
    /// service-side `error`; callers decide what that means.
    pub async fn call_into<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let body = self.call(method, params).await?;
        serde_json::from_str(&body).map_err(|source| PiazzaError::Decode {
            context: format!("response of method {:?}", method),
            source,
        })
    }

    /// Fetches the user status and records its session identifier
    ///
    /// The identifier is stored before the service error is checked, and
    /// every call overwrites the previous one.
    pub async fn user_status(&mut self) -> Result<UserStatus> {
        let response: ApiResponse<UserStatus> = self
            .call_into(USER_STATUS_METHOD, &serde_json::Map::new())
            .await?;

        self.session
            .state_mut()
            .set_aid(response.aid.clone().unwrap_or_default());
        tracing::debug!(
            "Session identifier is now {:?}",
            self.session.state().aid()
        );

        response.into_result(USER_STATUS_METHOD)
    }

    /// Lists the threads of a class
    pub async fn feed(&self, class_id: &str) -> Result<Feed> {
        let response: ApiResponse<Feed> = self
            .call_into(FEED_METHOD, &FeedParams { nid: class_id })
            .await?;
        response.into_result(FEED_METHOD)
    }

    /// Fetches one thread with its whole reply tree
    pub async fn content(&self, class_id: &str, content_id: &str) -> Result<Post> {
        let params = ContentParams {
            cid: content_id,
            nid: class_id,
        };
        let response: ApiResponse<Post> = self.call_into(CONTENT_METHOD, &params).await?;
        response.into_result(CONTENT_METHOD)
    }
}
