use serde::Deserialize;

/// Login page of the public deployment
pub const DEFAULT_LOGIN_URL: &str = "https://piazza.com/account/login";

/// RPC endpoint shared by every API method
pub const DEFAULT_API_ENDPOINT: &str = "https://piazza.com/logic/api";

/// Base URL used to build class resource pages
pub const DEFAULT_SITE_URL: &str = "https://piazza.com";

/// Main configuration structure for piazza-api
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Service endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Page holding the `#login-form`
    #[serde(rename = "login-url")]
    pub login_url: String,

    /// JSON-RPC endpoint; `?method=` is appended per call
    #[serde(rename = "api-endpoint")]
    pub api_endpoint: String,

    /// Site root for class resource pages
    #[serde(rename = "site-url")]
    pub site_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds (0 disables it)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (0 disables it)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("piazza-api/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 0,
            connect_timeout_secs: 10,
        }
    }
}
