//! Core types - pure abstractions shared across the codebase.

mod page;
mod url;

pub use page::{JsonMap, PageEvent, PageId, PageTable};
pub use url::{UrlPath, encode_path};
