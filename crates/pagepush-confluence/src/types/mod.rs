//! Confluence API types.

mod ancestor;
mod page;
mod update;

pub use ancestor::{AncestorRef, AncestorsResponse};
pub use page::{Body, Links, PageInfo, Storage, Version};
pub use update::{PageSnapshot, PageUpdate};
