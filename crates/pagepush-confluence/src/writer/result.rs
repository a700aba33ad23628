//! Page write results.

use crate::types::{PageInfo, PageUpdate};

/// Result of a successful page write.
#[derive(Debug)]
pub struct WriteResult {
    /// Page as returned by the server after the update.
    pub page: PageInfo,
    /// Version before the update.
    pub previous_version: u32,
    /// Browser URL for the page.
    pub url: String,
}

/// Result of a dry run.
#[derive(Debug)]
pub struct DryRunResult {
    /// Payload that would be sent.
    pub update: PageUpdate,
    /// Current title on the server.
    pub current_title: String,
    /// Current version on the server.
    pub current_version: u32,
    /// Title of the immediate parent, if any.
    pub parent_title: Option<String>,
}
