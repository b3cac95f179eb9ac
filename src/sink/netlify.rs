//! Netlify-style `_redirects` file.
//!
//! ```text
//! # generated by autoredirect
//! /old/  /new/  301
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::RegisterRedirect;
use crate::core::encode_path;
use crate::redirect::RedirectEdge;
use crate::utils::plural_count;
use crate::log;

const HEADER: &str = "# generated by autoredirect, do not edit\n";

/// Buffers one line per edge and writes the whole file on flush.
#[derive(Debug, Clone)]
pub struct NetlifyRedirects {
    path: PathBuf,
    lines: Vec<String>,
}

impl NetlifyRedirects {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Vec::new(),
        }
    }

    fn format_line(edge: &RedirectEdge) -> String {
        format!(
            "{}  {}  {}",
            encode_path(&edge.from_path),
            encode_path(&edge.to_path),
            edge.status_code()
        )
    }

    fn render(&self) -> String {
        let mut content = String::from(HEADER);
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }
        content
    }
}

impl RegisterRedirect for NetlifyRedirects {
    fn register(&mut self, edge: &RedirectEdge) -> Result<()> {
        self.lines.push(Self::format_line(edge));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, self.render())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        log!("redirect"; "wrote {} to {}", plural_count(self.lines.len(), "rule"), self.path.display());
        Ok(())
    }
}
