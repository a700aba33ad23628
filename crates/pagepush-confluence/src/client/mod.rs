//! Confluence REST API client.
//!
//! Provides sync HTTP client for the Confluence content REST API
//! with HTTP basic authentication.

mod pages;

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::auth::BasicAuth;
use crate::error::ConfluenceError;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth: BasicAuth,
}

impl ConfluenceClient {
    /// Create a client for the wiki at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Confluence wiki base URL (e.g. `https://example.atlassian.net/wiki`)
    /// * `username` - Login username
    /// * `password` - Login password or API token
    /// * `timeout` - Global request timeout; `None` waits indefinitely
    #[must_use]
    pub fn new(base_url: &str, username: &str, password: &str, timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth: BasicAuth::new(username, password),
        }
    }

    /// Get the content API base URL.
    fn content_url(&self) -> String {
        format!("{}/rest/api/content", self.base_url)
    }
}

/// Turn an error status into [`ConfluenceError::HttpResponse`], otherwise hand back the body.
fn check_status(response: Response<ureq::Body>) -> Result<ureq::Body, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ConfluenceClient::new("https://wiki.example.com/wiki/", "u", "p", None);
        assert_eq!(
            client.content_url(),
            "https://wiki.example.com/wiki/rest/api/content"
        );
    }
}
