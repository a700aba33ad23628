//! Page write errors.

use crate::error::ConfluenceError;

/// Error during a page write.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Reading the current page state failed; nothing was written.
    #[error("failed to read page {page_id}")]
    Read {
        /// Target page ID.
        page_id: u64,
        /// Underlying API error.
        #[source]
        source: ConfluenceError,
    },

    /// The server rejected or failed the update.
    #[error("failed to write page {page_id}")]
    Write {
        /// Target page ID.
        page_id: u64,
        /// Underlying API error.
        #[source]
        source: ConfluenceError,
    },
}
