//! `[output]` section: where final redirects are registered.
//!
//! ```toml
//! [output]
//! dir = "public"          # build output directory (relative to project root)
//! format = "html"         # html | netlify | none
//! file = "_redirects"     # netlify rules file (relative to `dir`)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Redirect sink format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Meta-refresh `index.html` at every old path
    #[default]
    Html,
    /// A single Netlify/Cloudflare-style `_redirects` file
    Netlify,
    /// Persist the snapshot only
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "public".into(),
            format: OutputFormat::Html,
            file: "_redirects".into(),
        }
    }
}

impl OutputConfig {
    pub const FILE: FieldPath = FieldPath::new("output.file");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.format != OutputFormat::Netlify {
            return;
        }
        if self.file.as_os_str().is_empty() {
            diag.error(Self::FILE, "netlify output needs a file name");
        } else if self.file.is_absolute() {
            diag.error_with_hint(
                Self::FILE,
                "must be relative",
                "the file is placed inside `output.dir`",
            );
        }
    }
}
