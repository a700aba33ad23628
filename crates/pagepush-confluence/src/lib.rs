//! Confluence page read/write client.
//!
//! Reads the current state of a page (title, version, ancestry) and writes
//! a new storage-format body back with the next version number.
//!
//! # Architecture
//!
//! - [`ContentApi`] trait with `get_page_info()`, `get_page_ancestors()` and `put_page()`
//! - [`ConfluenceClient`] implementation over the Confluence REST API with HTTP basic auth
//! - [`PageWriter`] that composes a [`PageUpdate`] from a fresh [`PageSnapshot`]
//! - [`MockContentApi`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pagepush_confluence::{ConfluenceClient, PageWriter, WriteRequest};
//!
//! let client = ConfluenceClient::new("https://example.atlassian.net/wiki", "jdoe", "password", None);
//! let writer = PageWriter::new(&client);
//!
//! let result = writer.write_page(12345, &WriteRequest::new("<p>Hello</p>"))?;
//! println!("Wrote '{}' version {}", result.page.title, result.page.version.number);
//! # Ok(())
//! # }
//! ```

mod api;
mod auth;
mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod types;
mod writer;

pub use api::ContentApi;
pub use client::ConfluenceClient;
pub use error::ConfluenceError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentApi;
pub use types::{AncestorRef, Body, Links, PageInfo, PageSnapshot, PageUpdate, Storage, Version};
pub use writer::{DryRunResult, PageWriter, WriteError, WriteRequest, WriteResult};
