//! Bulk email preference rewrite

use super::client::RpcClient;
use super::types::EmailPrefs;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Method that stores user settings
pub const USER_UPDATE_METHOD: &str = "user.update";

/// Preference entry that is not a class
const CAREER_PREFS_KEY: &str = "career";

/// Value of `new` that stops emails about new posts
pub const NO_EMAILS: &str = "no-emails";

#[derive(Debug, Serialize)]
struct UpdateEmailsParams<'a> {
    email_prefs: &'a EmailPrefs,
}

/// Sets `new` to `"no-emails"` on every class entry
///
/// Drops the `career` entry and returns how many entries were rewritten.
pub fn opt_out_prefs(prefs: &mut EmailPrefs) -> usize {
    prefs.remove(CAREER_PREFS_KEY);

    let mut updated = 0;
    for pref in prefs.values_mut() {
        if let Value::Object(fields) = pref {
            fields.insert("new".to_string(), Value::String(NO_EMAILS.to_string()));
            updated += 1;
        }
    }
    updated
}

impl RpcClient {
    /// Opts out of new-post emails in every class
    ///
    /// Returns the number of classes updated.
    pub async fn opt_out_of_emails(&mut self) -> Result<usize> {
        let status = self.user_status().await?;
        let mut prefs = status.config.email_prefs;
        let updated = opt_out_prefs(&mut prefs);

        self.call(
            USER_UPDATE_METHOD,
            &UpdateEmailsParams {
                email_prefs: &prefs,
            },
        )
        .await?;

        tracing::info!("Opted out of emails for {} classes", updated);
        Ok(updated)
    }
}
