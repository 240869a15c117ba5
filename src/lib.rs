//! piazza-api: a client for Piazza's internal web API
//!
//! This crate logs in to Piazza with a regular web session, talks to the
//! JSON-RPC style endpoint the web UI uses, and exposes classes, threads and
//! replies through `piazza://class/post` addresses that resolve to HTML.

pub mod config;
pub mod resolver;
pub mod resources;
pub mod rpc;
pub mod session;

use thiserror::Error;

/// Main error type for piazza-api operations
#[derive(Debug, Error)]
pub enum PiazzaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        source: serde_json::Error,
    },

    #[error("Failed to encode params of method {method:?}: {source}")]
    Encode {
        method: String,
        source: serde_json::Error,
    },

    #[error("Response to method {method:?} has no result")]
    MissingResult { method: String },

    #[error("Service error from method {method:?}: {message}")]
    Service { method: String, message: String },

    #[error("Invalid RPC method name: {0:?}")]
    InvalidMethod(String),

    #[error("Class {class_id:?} has not been listed yet, fetch piazza:// before this")]
    NotResolved { class_id: String },

    #[error("Scheme is not {expected:?}, got {found:?}")]
    Scheme { expected: String, found: String },

    #[error("Invalid address: {0}")]
    Address(#[from] ::url::ParseError),

    #[error("HTML error for {url}: {message}")]
    Html { url: String, message: String },
}

/// Login failures reported by the service
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login returned StatusCode = {0}")]
    Status(u16),

    #[error("login rejected: {0}")]
    Rejected(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for piazza-api operations
pub type Result<T> = std::result::Result<T, PiazzaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use resolver::{HtmlResolver, PIAZZA_SCHEME};
pub use rpc::RpcClient;
pub use session::{Session, SessionState};
