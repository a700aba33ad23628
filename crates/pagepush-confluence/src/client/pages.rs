//! Page operations for Confluence API.

use tracing::{info, warn};

use super::{ConfluenceClient, check_status};
use crate::api::ContentApi;
use crate::error::ConfluenceError;
use crate::types::{AncestorRef, AncestorsResponse, PageInfo, PageUpdate};

impl ConfluenceClient {
    fn page_url(&self, page_id: u64) -> String {
        format!("{}/{}", self.content_url(), page_id)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ConfluenceError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", self.auth.header())
            .header("Accept", "application/json")
            .call()
            .inspect_err(|e| warn!(url, error = %e, "Request failed"))?;

        let mut body = check_status(response)
            .inspect_err(|e| warn!(url, user = self.auth.username(), error = %e, "Read rejected"))?;
        Ok(body.read_json()?)
    }
}

impl ContentApi for ConfluenceClient {
    fn get_page_info(&self, page_id: u64) -> Result<PageInfo, ConfluenceError> {
        info!("Getting page {}", page_id);
        self.get_json(&self.page_url(page_id))
    }

    fn get_page_ancestors(&self, page_id: u64) -> Result<Vec<AncestorRef>, ConfluenceError> {
        info!("Getting ancestors of page {}", page_id);
        let url = format!("{}?expand=ancestors", self.page_url(page_id));
        let response: AncestorsResponse = self.get_json(&url)?;
        info!(
            "Page {} has {} ancestors",
            page_id,
            response.ancestors.len()
        );
        Ok(response.ancestors)
    }

    fn put_page(&self, page_id: u64, update: &PageUpdate) -> Result<PageInfo, ConfluenceError> {
        let url = self.page_url(page_id);
        let payload = serde_json::to_vec(update)?;

        info!(
            "Updating page {} to version {}",
            page_id, update.version.number
        );

        let response = self
            .agent
            .put(&url)
            .header("Authorization", self.auth.header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let mut body = check_status(response)?;
        Ok(body.read_json()?)
    }

    fn view_url(&self, page_id: u64) -> String {
        format!("{}/pages/viewpage.action?pageId={page_id}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_urls() {
        let client = ConfluenceClient::new("https://wiki.example.com/wiki", "u", "p", None);
        assert_eq!(
            client.page_url(123),
            "https://wiki.example.com/wiki/rest/api/content/123"
        );
        assert_eq!(
            client.view_url(123),
            "https://wiki.example.com/wiki/pages/viewpage.action?pageId=123"
        );
    }
}
