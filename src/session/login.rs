//! Login form handling
//!
//! Reads the login form out of the login page, fills the credential
//! fields and inspects the page the service answers with.

use crate::{PiazzaError, Result};
use reqwest::{Client, Method, RequestBuilder};
use scraper::{Html, Selector};
use url::Url;

/// Selector of the login form on the login page
pub const LOGIN_FORM_SELECTOR: &str = "form#login-form";

/// Element the service fills with a message when login is refused
pub const LOGIN_ERROR_SELECTOR: &str = "#modal_error_text";

/// Name of the email input
pub const EMAIL_FIELD: &str = "email";

/// Name of the password input
pub const PASSWORD_FIELD: &str = "password";

/// A login form ready to be filled and submitted
#[derive(Debug, Clone)]
pub struct LoginForm {
    action: Url,
    method: Method,
    fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Locates the login form in `html`
    ///
    /// The form action is resolved against `page_url`; a missing action
    /// submits back to the page itself. Every named input is collected with
    /// its current value so hidden fields are submitted as the browser would.
    pub fn parse(html: &str, page_url: &Url) -> Result<Self> {
        let document = Html::parse_document(html);
        let form_selector = selector(LOGIN_FORM_SELECTOR, page_url)?;
        let input_selector = selector("input[name], textarea[name]", page_url)?;

        let form = document
            .select(&form_selector)
            .next()
            .ok_or_else(|| PiazzaError::Html {
                url: page_url.to_string(),
                message: format!("no element matches {}", LOGIN_FORM_SELECTOR),
            })?;

        let action = match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => page_url.join(action)?,
            _ => page_url.clone(),
        };

        let method = match form.value().attr("method") {
            Some(method) if method.eq_ignore_ascii_case("post") => Method::POST,
            _ => Method::GET,
        };

        let mut fields = Vec::new();
        for input in form.select(&input_selector) {
            let element = input.value();
            let kind = element.attr("type").unwrap_or("text").to_ascii_lowercase();
            match kind.as_str() {
                "submit" | "button" | "image" | "reset" | "file" => continue,
                "checkbox" | "radio" if element.attr("checked").is_none() => continue,
                _ => {}
            }

            if let Some(name) = element.attr("name") {
                let value = if element.name() == "textarea" {
                    input.text().collect::<String>()
                } else {
                    element.attr("value").unwrap_or_default().to_string()
                };
                fields.push((name.to_string(), value));
            }
        }

        Ok(Self {
            action,
            method,
            fields,
        })
    }

    /// Sets the value of an existing field
    ///
    /// Fails if the form has no field called `name`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let mut found = false;
        for (field, current) in self.fields.iter_mut() {
            if field == name {
                *current = value.to_string();
                found = true;
            }
        }

        if found {
            Ok(())
        } else {
            Err(PiazzaError::Html {
                url: self.action.to_string(),
                message: format!("login form has no field named {:?}", name),
            })
        }
    }

    /// Fills both credential fields
    pub fn fill_credentials(&mut self, email: &str, password: &str) -> Result<()> {
        self.set(EMAIL_FIELD, email)?;
        self.set(PASSWORD_FIELD, password)
    }

    /// Where the form submits to
    pub fn action(&self) -> &Url {
        &self.action
    }

    /// The submission method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Current value of `name`, if the form has that field
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Builds the submission request
    pub fn request(&self, client: &Client) -> RequestBuilder {
        if self.method == Method::POST {
            client.post(self.action.clone()).form(&self.fields)
        } else {
            client.get(self.action.clone()).query(&self.fields)
        }
    }
}

/// Returns the error message shown on a refused login, if any
pub fn login_error_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let error_selector = Selector::parse(LOGIN_ERROR_SELECTOR).ok()?;

    document
        .select(&error_selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

fn selector(css: &str, page_url: &Url) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PiazzaError::Html {
        url: page_url.to_string(),
        message: format!("invalid selector {}: {:?}", css, e),
    })
}
