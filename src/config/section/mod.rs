//! Configuration section definitions.
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `snapshot` | `[snapshot]`   | Page id property, snapshot files     |
//! | `edge`     | `[edge]`       | Metadata on new redirects            |
//! | `output`   | `[output]`     | Redirect sink and its location       |

mod edge;
mod output;
mod snapshot;

pub use edge::EdgeConfig;
pub use output::{OutputConfig, OutputFormat};
pub use snapshot::SnapshotConfig;
