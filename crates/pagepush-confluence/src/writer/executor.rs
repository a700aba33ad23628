//! Page writer implementation.

use tracing::{debug, info, warn};

use crate::api::ContentApi;
use crate::types::{AncestorRef, PageSnapshot, PageUpdate};

use super::WriteRequest;
use super::error::WriteError;
use super::result::{DryRunResult, WriteResult};

/// Replaces the body of a Confluence page.
pub struct PageWriter<'a> {
    api: &'a dyn ContentApi,
}

impl<'a> PageWriter<'a> {
    /// Create a new page writer.
    #[must_use]
    pub fn new(api: &'a dyn ContentApi) -> Self {
        Self { api }
    }

    /// Read the current state of a page.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Read`] if either the page info or the
    /// ancestor request fails.
    pub fn snapshot(&self, page_id: u64) -> Result<PageSnapshot, WriteError> {
        let read_error = |source| WriteError::Read { page_id, source };

        let info = self.api.get_page_info(page_id).map_err(read_error)?;
        let ancestors = self.api.get_page_ancestors(page_id).map_err(read_error)?;

        debug!(
            page_id,
            title = %info.title,
            version = info.version.number,
            ancestors = ancestors.len(),
            "Fetched page snapshot"
        );
        Ok(PageSnapshot::new(info, ancestors))
    }

    /// Write `request` to the page.
    ///
    /// This method:
    /// 1. Fetches the current page snapshot
    /// 2. Builds an update with version + 1 and the immediate parent
    /// 3. Puts the update
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Read`] if the snapshot cannot be fetched (nothing
    /// is written), or [`WriteError::Write`] if the server rejects the update.
    pub fn write_page(
        &self,
        page_id: u64,
        request: &WriteRequest<'_>,
    ) -> Result<WriteResult, WriteError> {
        let snapshot = self.snapshot(page_id)?;
        let update = Self::build_update(&snapshot, request);

        let page = self
            .api
            .put_page(page_id, &update)
            .map_err(|source| WriteError::Write { page_id, source })?;

        info!(
            "Wrote '{}' version {} (was {})",
            page.title, page.version.number, snapshot.version
        );

        let url = page
            .links
            .as_ref()
            .and_then(crate::types::Links::web_url)
            .unwrap_or_else(|| self.api.view_url(page_id));

        Ok(WriteResult {
            page,
            previous_version: snapshot.version,
            url,
        })
    }

    /// Build the update without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Read`] if the snapshot cannot be fetched.
    pub fn dry_run(
        &self,
        page_id: u64,
        request: &WriteRequest<'_>,
    ) -> Result<DryRunResult, WriteError> {
        let snapshot = self.snapshot(page_id)?;
        let update = Self::build_update(&snapshot, request);

        Ok(DryRunResult {
            parent_title: snapshot
                .immediate_parent()
                .and_then(AncestorRef::title)
                .map(str::to_owned),
            current_title: snapshot.title,
            current_version: snapshot.version,
            update,
        })
    }

    fn build_update(snapshot: &PageSnapshot, request: &WriteRequest<'_>) -> PageUpdate {
        match snapshot.immediate_parent() {
            Some(parent) => debug!(
                page_id = %snapshot.id,
                parent_id = parent.id().unwrap_or("?"),
                "Keeping immediate parent"
            ),
            None => warn!(
                page_id = %snapshot.id,
                "Page has no ancestors; sending update without a parent"
            ),
        }
        PageUpdate::from_snapshot(snapshot, request.html, request.title, request.message)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::mock::MockContentApi;

    fn runbook_api() -> MockContentApi {
        MockContentApi::new()
            .with_page(100, "Runbook", 3)
            .with_ancestors(
                100,
                json!([
                    {"id": "1", "type": "page", "title": "Home",
                     "_links": {"self": "https://wiki.example.com/rest/api/content/1"}},
                    {"id": "2", "type": "page", "title": "Operations",
                     "_links": {"webui": "/display/OPS/Operations"},
                     "_expandable": {"space": "/rest/api/space/OPS"},
                     "extensions": {"position": "none"}}
                ]),
            )
    }

    #[test]
    fn test_write_increments_version() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        let result = writer
            .write_page(100, &WriteRequest::new("<p>v4</p>"))
            .unwrap();

        let puts = api.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].1.version.number, 4);
        assert_eq!(result.previous_version, 3);
        assert_eq!(result.page.version.number, 4);
    }

    #[test]
    fn test_write_keeps_only_stripped_immediate_parent() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        writer.write_page(100, &WriteRequest::new("<p/>")).unwrap();

        let puts = api.puts();
        let (_, update) = &puts[0];
        assert_eq!(
            serde_json::to_value(&update.ancestors).unwrap(),
            json!([{"id": "2", "type": "page", "title": "Operations"}])
        );
    }

    #[test]
    fn test_write_keeps_title_without_override() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        writer.write_page(100, &WriteRequest::new("<p/>")).unwrap();

        assert_eq!(api.puts()[0].1.title, "Runbook");
        assert_eq!(api.page(100).unwrap().title, "Runbook");
    }

    #[test]
    fn test_write_applies_title_override() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        let request = WriteRequest::new("<p/>").title(Some("Incident Runbook"));
        let result = writer.write_page(100, &request).unwrap();

        assert_eq!(result.page.title, "Incident Runbook");
        assert_eq!(api.puts()[0].1.title, "Incident Runbook");
    }

    #[test]
    fn test_write_sends_body_verbatim() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);
        let html = "<h1>Title</h1>\n<p>Caf\u{e9} &amp; <ac:structured-macro ac:name=\"toc\"/></p>\n";

        writer.write_page(100, &WriteRequest::new(html)).unwrap();

        let puts = api.puts();
        let storage = &puts[0].1.body.storage;
        assert_eq!(storage.value, html);
        assert_eq!(storage.representation, "storage");
    }

    #[test]
    fn test_consecutive_writes_chain_versions() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        writer.write_page(100, &WriteRequest::new("a")).unwrap();
        writer.write_page(100, &WriteRequest::new("b")).unwrap();

        let versions: Vec<_> = api.puts().iter().map(|(_, u)| u.version.number).collect();
        assert_eq!(versions, vec![4, 5]);
    }

    #[test]
    fn test_write_url_prefers_server_links() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        let result = writer.write_page(100, &WriteRequest::new("<p/>")).unwrap();

        assert_eq!(result.url, "https://wiki.example.com/wiki/spaces/TEST/pages/100");
    }

    #[test]
    fn test_write_url_falls_back_to_view_url() {
        let api = runbook_api().without_response_links();
        let writer = PageWriter::new(&api);

        let result = writer.write_page(100, &WriteRequest::new("<p/>")).unwrap();

        assert!(result.page.links.is_none());
        assert_eq!(result.url, api.view_url(100));
        assert_eq!(
            result.url,
            "https://wiki.example.com/wiki/pages/viewpage.action?pageId=100"
        );
    }

    #[test]
    fn test_read_failure_prevents_write() {
        let api = runbook_api().failing_reads(401);
        let writer = PageWriter::new(&api);

        let err = writer
            .write_page(100, &WriteRequest::new("<p/>"))
            .unwrap_err();

        assert!(matches!(err, WriteError::Read { page_id: 100, .. }));
        assert!(api.puts().is_empty());
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn test_missing_page_is_read_error() {
        let api = MockContentApi::new();
        let writer = PageWriter::new(&api);

        let err = writer.write_page(7, &WriteRequest::new("<p/>")).unwrap_err();

        let WriteError::Read { source, .. } = err else {
            panic!("expected read error");
        };
        assert_eq!(source.status(), Some(404));
    }

    #[test]
    fn test_write_rejection_is_propagated() {
        let api = runbook_api().failing_writes(403);
        let writer = PageWriter::new(&api);

        let err = writer
            .write_page(100, &WriteRequest::new("<p/>"))
            .unwrap_err();

        let WriteError::Write { page_id, source } = err else {
            panic!("expected write error");
        };
        assert_eq!(page_id, 100);
        assert_eq!(source.status(), Some(403));
        assert_eq!(api.page(100).unwrap().version.number, 3);
    }

    #[test]
    fn test_page_without_ancestors_writes_without_parent() {
        let api = MockContentApi::new().with_page(5, "Space Home", 10);
        let writer = PageWriter::new(&api);

        let result = writer.write_page(5, &WriteRequest::new("<p/>")).unwrap();

        assert_eq!(result.page.version.number, 11);
        assert!(api.puts()[0].1.ancestors.is_empty());
    }

    #[test]
    fn test_dry_run_sends_nothing() {
        let api = runbook_api();
        let writer = PageWriter::new(&api);

        let request = WriteRequest::new("<p/>").message(Some("preview"));
        let result = writer.dry_run(100, &request).unwrap();

        assert!(api.puts().is_empty());
        assert_eq!(result.current_title, "Runbook");
        assert_eq!(result.current_version, 3);
        assert_eq!(result.parent_title.as_deref(), Some("Operations"));
        assert_eq!(result.update.version.number, 4);
        assert_eq!(result.update.version.message.as_deref(), Some("preview"));
    }
}
