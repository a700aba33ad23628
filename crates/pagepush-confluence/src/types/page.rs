//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page metadata.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PageInfo {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type", default = "default_content_type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
    /// Hypermedia links.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

fn default_content_type() -> String {
    "page".to_owned()
}

/// Page version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    pub storage: Storage,
}

/// Storage format representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

impl Storage {
    /// Wrap HTML as a storage-format value.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            value: html.into(),
            representation: "storage".to_owned(),
        }
    }
}

/// Hypermedia links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Links {
    /// Site base URL (e.g. `https://example.atlassian.net/wiki`).
    #[serde(default)]
    pub base: Option<String>,
    /// Web UI link, relative to `base`.
    #[serde(default)]
    pub webui: Option<String>,
}

impl Links {
    /// Absolute web UI URL, if the server provided both parts.
    #[must_use]
    pub fn web_url(&self) -> Option<String> {
        match (&self.base, &self.webui) {
            (Some(base), Some(webui)) => Some(format!("{}{webui}", base.trim_end_matches('/'))),
            _ => None,
        }
    }
}
