//! Authenticated web session
//!
//! This module owns everything that rides on the browser-style session:
//! - Building the cookie-carrying HTTP client
//! - Logging in through the login form
//! - Fetching pages with the session's cookies
//! - Holding the `aid` session identifier for RPC calls

mod login;
mod state;
mod transport;

pub use login::{
    login_error_text, LoginForm, EMAIL_FIELD, LOGIN_ERROR_SELECTOR, LOGIN_FORM_SELECTOR,
    PASSWORD_FIELD,
};
pub use state::SessionState;
pub use transport::{build_http_client, send, FetchedPage};

use crate::config::{validate, Config};
use crate::{AuthError, PiazzaError, Result};
use reqwest::{Client, StatusCode};

/// A web session against one Piazza deployment
///
/// Not meant to be shared: logging in and recording the session identifier
/// both need `&mut self`.
#[derive(Debug)]
pub struct Session {
    config: Config,
    http: Client,
    state: SessionState,
}

impl Session {
    /// Creates an unauthenticated session
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints and HTTP settings
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Session with an empty cookie jar
    /// * `Err(PiazzaError::Config)` - The configuration does not validate
    /// * `Err(PiazzaError::Http)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        validate(&config)?;

        let state = SessionState::new();
        let http = build_http_client(&config.http, state.jar()).map_err(|source| {
            PiazzaError::Http {
                url: config.service.login_url.clone(),
                source,
            }
        })?;

        Ok(Self {
            config,
            http,
            state,
        })
    }

    /// Logs in with the given credentials
    ///
    /// Starts from an empty cookie jar, so calling this again replaces the
    /// previous login instead of merging with it.
    ///
    /// # Errors
    ///
    /// * `PiazzaError::Auth(AuthError::Status)` - the form submission did not end in a 200
    /// * `PiazzaError::Auth(AuthError::Rejected)` - the service showed a login error
    /// * `PiazzaError::Html` - the login page has no usable login form
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.reset()?;

        let login_url = self.config.service.login_url.clone();
        tracing::debug!("Opening login page {}", login_url);
        let page = send(self.http.get(&login_url), &login_url)
            .await?
            .require_ok()?;

        let mut form = LoginForm::parse(&page.body, &page.url)?;
        form.fill_credentials(email, password)?;

        let action = form.action().to_string();
        tracing::debug!("Submitting login form to {}", action);
        let response = send(form.request(&self.http), &action).await?;

        if response.status != StatusCode::OK {
            return Err(AuthError::Status(response.status.as_u16()).into());
        }
        if let Some(message) = login_error_text(&response.body) {
            return Err(AuthError::Rejected(message).into());
        }

        tracing::info!("Logged in as {}", email);
        Ok(())
    }

    /// Fetches `url` with the session's cookies, whatever the status
    pub async fn get_raw(&self, url: &str) -> Result<FetchedPage> {
        tracing::debug!("GET {}", url);
        send(self.http.get(url), url).await
    }

    /// Fetches `url` and requires a 200 response
    pub async fn get_page(&self, url: &str) -> Result<String> {
        Ok(self.get_raw(url).await?.require_ok()?.body)
    }

    /// The HTTP client bound to the current cookie jar
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// The configuration this session was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cookies and session identifier
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable access to cookies and session identifier
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Drops all authentication state and rebinds the client to a fresh jar
    fn reset(&mut self) -> Result<()> {
        self.state.reset();
        self.http = build_http_client(&self.config.http, self.state.jar()).map_err(|source| {
            PiazzaError::Http {
                url: self.config.service.login_url.clone(),
                source,
            }
        })?;
        Ok(())
    }
}
