//! Confluence ancestor types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-side fields that must not be echoed back in an update.
const SERVER_FIELDS: [&str; 3] = ["_links", "_expandable", "extensions"];

/// A page in the ancestor chain of another page.
///
/// Kept as the raw JSON object so that every page-identifying field the
/// server sent survives the round trip into an update payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AncestorRef(Map<String, Value>);

impl AncestorRef {
    /// Ancestor page ID.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Ancestor page title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Drop link, expansion and extension metadata.
    #[must_use]
    pub fn stripped(mut self) -> Self {
        for key in SERVER_FIELDS {
            self.0.remove(key);
        }
        self
    }
}

/// Response of `GET content/{id}?expand=ancestors`.
///
/// Ancestors are ordered from the space root down to the immediate parent.
#[derive(Debug, Clone, Deserialize)]
pub struct AncestorsResponse {
    /// Ancestor chain.
    #[serde(default)]
    pub ancestors: Vec<AncestorRef>,
}
