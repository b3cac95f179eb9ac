//! `[edge]` section: metadata attached to every new redirect.
//!
//! ```toml
//! [edge]
//! permanent = true    # isPermanent flag (301 vs 302 when no status is set)
//! status = 308        # optional explicit status code, must be 3xx
//! normalize = false   # canonicalize both ends as `/page/` urls
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::redirect::EdgeMaker;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub permanent: bool,
    pub status: Option<u16>,
    pub normalize: bool,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            permanent: true,
            status: None,
            normalize: false,
        }
    }
}

impl EdgeConfig {
    pub const STATUS: FieldPath = FieldPath::new("edge.status");

    /// Edge constructor configured by this section.
    pub fn edge_maker(&self) -> EdgeMaker {
        EdgeMaker {
            permanent: self.permanent,
            status: self.status,
            normalize: self.normalize,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(status) = self.status
            && !(300..400).contains(&status)
        {
            diag.error_with_hint(
                Self::STATUS,
                format!("{status} is not a redirect status"),
                "use 301, 302, 307 or 308",
            );
        }
    }
}
