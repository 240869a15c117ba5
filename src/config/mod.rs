//! Configuration module for piazza-api
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a default pointing at the public Piazza deployment, so a
//! configuration file is only needed to override endpoints or HTTP settings.
//!
//! # Example
//!
//! ```no_run
//! use piazza_api::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("piazza.toml")).unwrap();
//! println!("RPC endpoint: {}", config.service.api_endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, ServiceConfig, DEFAULT_API_ENDPOINT, DEFAULT_LOGIN_URL, DEFAULT_SITE_URL,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
