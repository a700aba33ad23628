//! Page writer for Confluence.
//!
//! This module provides the [`PageWriter`] struct that encapsulates the
//! read-then-write workflow for replacing a page body:
//!
//! 1. Fetch current page info (title, version)
//! 2. Fetch the ancestor chain
//! 3. Build an update carrying version + 1 and the immediate parent
//! 4. Put the update
//!
//! Any failed read aborts before anything is written. A rejected write leaves
//! the page unchanged; the server refuses stale version numbers, so rerunning
//! is safe.

mod error;
mod executor;
mod result;

pub use error::WriteError;
pub use executor::PageWriter;
pub use result::{DryRunResult, WriteResult};

/// Content and metadata for one page write.
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    /// New body in storage format.
    pub html: &'a str,
    /// Replacement title. The current title is kept when `None`.
    pub title: Option<&'a str>,
    /// Version message.
    pub message: Option<&'a str>,
}

impl<'a> WriteRequest<'a> {
    /// Request that replaces only the body.
    #[must_use]
    pub fn new(html: &'a str) -> Self {
        Self {
            html,
            title: None,
            message: None,
        }
    }

    /// Set a replacement title.
    #[must_use]
    pub fn title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    /// Set a version message.
    #[must_use]
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}
