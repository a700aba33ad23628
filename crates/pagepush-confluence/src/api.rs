//! Content API abstraction.

use crate::error::ConfluenceError;
use crate::types::{AncestorRef, PageInfo, PageUpdate};

/// Operations on a single Confluence content item.
///
/// Implemented by [`ConfluenceClient`](crate::ConfluenceClient) for the REST
/// API and by `MockContentApi` for tests.
pub trait ContentApi {
    /// Get basic page info (title, version).
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError`] if the request fails or the server rejects it.
    fn get_page_info(&self, page_id: u64) -> Result<PageInfo, ConfluenceError>;

    /// Get the ancestor chain of a page, root first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError`] if the request fails or the server rejects it.
    fn get_page_ancestors(&self, page_id: u64) -> Result<Vec<AncestorRef>, ConfluenceError>;

    /// Replace a page with `update`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError`] if the request fails or the server rejects
    /// the update (e.g. version conflict, permission denied).
    fn put_page(&self, page_id: u64, update: &PageUpdate) -> Result<PageInfo, ConfluenceError>;

    /// Browser URL for a page.
    fn view_url(&self, page_id: u64) -> String;
}
