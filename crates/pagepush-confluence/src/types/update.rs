//! Page snapshot and update payload.

use serde::Serialize;

use super::ancestor::AncestorRef;
use super::page::{Body, PageInfo, Storage, Version};

/// Server-side state of a page, read immediately before a write.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    /// Page ID.
    pub id: String,
    /// Current title.
    pub title: String,
    /// Current version number.
    pub version: u32,
    /// Ancestor chain, root first.
    pub ancestors: Vec<AncestorRef>,
}

impl PageSnapshot {
    /// Combine page metadata with its ancestor chain.
    #[must_use]
    pub fn new(info: PageInfo, ancestors: Vec<AncestorRef>) -> Self {
        Self {
            id: info.id,
            title: info.title,
            version: info.version.number,
            ancestors,
        }
    }

    /// The immediate parent (last entry of the chain).
    #[must_use]
    pub fn immediate_parent(&self) -> Option<&AncestorRef> {
        self.ancestors.last()
    }

    /// Version number the next write must carry.
    ///
    /// Saturates at `u32::MAX`; the server then rejects the write as stale.
    #[must_use]
    pub fn next_version(&self) -> u32 {
        self.version.saturating_add(1)
    }
}

/// Outgoing `PUT content/{id}` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageUpdate {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Title to store.
    pub title: String,
    /// New version (previous + 1).
    pub version: Version,
    /// Immediate parent only. Omitted for pages without ancestors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<AncestorRef>,
    /// New body.
    pub body: Body,
}

impl PageUpdate {
    /// Build the update that replaces the body of `snapshot`.
    ///
    /// The title is kept unless `title` overrides it, and the parent is
    /// carried over with server-internal metadata removed.
    #[must_use]
    pub fn from_snapshot(
        snapshot: &PageSnapshot,
        html: &str,
        title: Option<&str>,
        message: Option<&str>,
    ) -> Self {
        let ancestors = snapshot
            .immediate_parent()
            .cloned()
            .map(AncestorRef::stripped)
            .into_iter()
            .collect();

        Self {
            id: snapshot.id.clone(),
            content_type: "page".to_owned(),
            title: title.unwrap_or(&snapshot.title).to_owned(),
            version: Version {
                number: snapshot.next_version(),
                message: message.map(str::to_owned),
            },
            ancestors,
            body: Body {
                storage: Storage::new(html),
            },
        }
    }
}
