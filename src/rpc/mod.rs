//! JSON-RPC style API client
//!
//! This module contains:
//! - The RPC client that signs calls with the session's cookies and `aid`
//! - Typed models of the responses the resolver consumes
//! - The email opt-out helper

mod client;
mod prefs;
mod types;

pub use client::{
    RpcClient, API_CONTENT_TYPE, CONTENT_METHOD, FEED_METHOD, USER_STATUS_METHOD,
};
pub(crate) use types::null_as_default;
pub use prefs::{opt_out_prefs, NO_EMAILS, USER_UPDATE_METHOD};
pub use types::{
    ApiRequest, ApiResponse, ContentParams, EmailPrefs, Feed, FeedEntry, FeedParams, Network,
    Post, Revision, UserConfig, UserStatus,
};
