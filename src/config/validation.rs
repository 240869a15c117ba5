use crate::config::types::{Config, HttpConfig, ServiceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_service_config(&config.service)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates service endpoints
fn validate_service_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    validate_http_url("login-url", &config.login_url)?;
    validate_http_url("api-endpoint", &config.api_endpoint)?;
    validate_http_url("site-url", &config.site_url)?;

    let endpoint = Url::parse(&config.api_endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("api-endpoint: {}", e)))?;
    if endpoint.query().is_some() {
        return Err(ConfigError::Validation(format!(
            "api-endpoint must not carry a query string, got '{}'",
            config.api_endpoint
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses `value` and requires an HTTP(S) scheme
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(())
}
