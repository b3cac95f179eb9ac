//! `[snapshot]` section: page identity and snapshot file locations.
//!
//! ```toml
//! [snapshot]
//! page_id = "contentfulId"    # page context key holding the stable page id
//! pages = "pages.json"        # page table file (relative to project root)
//! redirects = "redirects.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Page context property holding the page id.
    pub page_id: String,
    /// Page table snapshot file.
    pub pages: PathBuf,
    /// Redirect set snapshot file.
    pub redirects: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            page_id: "id".into(),
            pages: "pages.json".into(),
            redirects: "redirects.json".into(),
        }
    }
}

impl SnapshotConfig {
    pub const PAGE_ID: FieldPath = FieldPath::new("snapshot.page_id");
    pub const REDIRECTS: FieldPath = FieldPath::new("snapshot.redirects");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.page_id.trim().is_empty() {
            diag.error_with_hint(
                Self::PAGE_ID,
                "page id property must not be empty",
                "use the page context key that stays stable across builds, e.g. \"id\"",
            );
        }
        if self.pages == self.redirects {
            diag.error(
                Self::REDIRECTS,
                format!("pages and redirects share the file `{}`", self.pages.display()),
            );
        }
    }
}
