//! Mock content API for testing.
//!
//! Provides [`MockContentApi`] for unit testing without network access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::ContentApi;
use crate::error::ConfluenceError;
use crate::types::{AncestorRef, Links, PageInfo, PageUpdate, Version};

const MOCK_BASE_URL: &str = "https://wiki.example.com/wiki";

/// In-memory Confluence content store.
///
/// Enforces the server's version rule: a put must carry the stored version + 1,
/// otherwise it is rejected with HTTP 409.
///
/// # Example
///
/// ```ignore
/// use pagepush_confluence::{MockContentApi, PageWriter, WriteRequest};
///
/// let api = MockContentApi::new()
///     .with_page(100, "Runbook", 3)
///     .with_ancestors(100, serde_json::json!([{"id": "1", "title": "Ops"}]));
///
/// let result = PageWriter::new(&api).write_page(100, &WriteRequest::new("<p/>"))?;
/// assert_eq!(result.page.version.number, 4);
/// ```
#[derive(Debug, Default)]
pub struct MockContentApi {
    pages: RwLock<HashMap<u64, PageInfo>>,
    ancestors: RwLock<HashMap<u64, Vec<AncestorRef>>>,
    read_failure: Option<u16>,
    write_failure: Option<u16>,
    omit_links: bool,
    puts: RwLock<Vec<(u64, PageUpdate)>>,
    requests: AtomicUsize,
}

impl MockContentApi {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given title and version.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page_id: u64, title: impl Into<String>, version: u32) -> Self {
        let page = PageInfo {
            id: page_id.to_string(),
            content_type: "page".to_owned(),
            title: title.into(),
            version: Version {
                number: version,
                message: None,
            },
            links: None,
        };
        self.pages.write().unwrap().insert(page_id, page);
        self
    }

    /// Set the ancestor chain of a page from a JSON array.
    ///
    /// # Panics
    ///
    /// Panics if `ancestors` is not an array of objects.
    #[must_use]
    pub fn with_ancestors(self, page_id: u64, ancestors: serde_json::Value) -> Self {
        let ancestors: Vec<AncestorRef> =
            serde_json::from_value(ancestors).expect("ancestors must be an array of objects");
        self.ancestors.write().unwrap().insert(page_id, ancestors);
        self
    }

    /// Make every read fail with the given HTTP status.
    #[must_use]
    pub fn failing_reads(mut self, status: u16) -> Self {
        self.read_failure = Some(status);
        self
    }

    /// Make every write fail with the given HTTP status.
    #[must_use]
    pub fn failing_writes(mut self, status: u16) -> Self {
        self.write_failure = Some(status);
        self
    }

    /// Leave `_links` out of put responses, like servers that don't expand them.
    #[must_use]
    pub fn without_response_links(mut self) -> Self {
        self.omit_links = true;
        self
    }

    /// Updates accepted so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn puts(&self) -> Vec<(u64, PageUpdate)> {
        self.puts.read().unwrap().clone()
    }

    /// Total number of API calls made, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Current stored state of a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn page(&self, page_id: u64) -> Option<PageInfo> {
        self.pages.read().unwrap().get(&page_id).cloned()
    }

    fn begin(&self, failure: Option<u16>) -> Result<(), ConfluenceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match failure {
            Some(status) => Err(http_error(status, "mock failure")),
            None => Ok(()),
        }
    }

    fn lookup(&self, page_id: u64) -> Result<PageInfo, ConfluenceError> {
        self.page(page_id)
            .ok_or_else(|| http_error(404, &format!("No content found with id: {page_id}")))
    }
}

fn http_error(status: u16, body: &str) -> ConfluenceError {
    ConfluenceError::HttpResponse {
        status,
        body: body.to_owned(),
    }
}

impl ContentApi for MockContentApi {
    fn get_page_info(&self, page_id: u64) -> Result<PageInfo, ConfluenceError> {
        self.begin(self.read_failure)?;
        self.lookup(page_id)
    }

    fn get_page_ancestors(&self, page_id: u64) -> Result<Vec<AncestorRef>, ConfluenceError> {
        self.begin(self.read_failure)?;
        self.lookup(page_id)?;
        Ok(self
            .ancestors
            .read()
            .unwrap()
            .get(&page_id)
            .cloned()
            .unwrap_or_default())
    }

    fn put_page(&self, page_id: u64, update: &PageUpdate) -> Result<PageInfo, ConfluenceError> {
        self.begin(self.write_failure)?;
        let current = self.lookup(page_id)?;

        let expected = current.version.number.saturating_add(1);
        if update.version.number != expected {
            return Err(http_error(
                409,
                &format!(
                    "Version must be incremented on update. Current version is: {}",
                    current.version.number
                ),
            ));
        }

        let updated = PageInfo {
            title: update.title.clone(),
            version: update.version.clone(),
            links: (!self.omit_links).then(|| Links {
                base: Some(MOCK_BASE_URL.to_owned()),
                webui: Some(format!("/spaces/TEST/pages/{page_id}")),
            }),
            ..current
        };
        self.pages.write().unwrap().insert(page_id, updated.clone());
        self.puts.write().unwrap().push((page_id, update.clone()));
        Ok(updated)
    }

    fn view_url(&self, page_id: u64) -> String {
        format!("{MOCK_BASE_URL}/pages/viewpage.action?pageId={page_id}")
    }
}
