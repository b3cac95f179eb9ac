//! Meta-refresh redirect pages.
//!
//! The output directory persists across builds, so `flush` removes pages
//! this sink wrote earlier for redirects that are no longer in the set.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rustc_hash::FxHashSet;

use super::RegisterRedirect;
use crate::embed::build::{GENERATOR_MARKER, REDIRECT_HTML, RedirectVars};
use crate::redirect::RedirectEdge;
use crate::utils::path::url_to_relative;
use crate::utils::plural_count;
use crate::{debug, log};

/// Writes one redirect HTML page per edge under the output directory.
#[derive(Debug, Clone)]
pub struct HtmlRedirectWriter {
    output_dir: PathBuf,
    /// Pages owned by a redirect of this build.
    written: FxHashSet<PathBuf>,
}

impl HtmlRedirectWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: FxHashSet::default(),
        }
    }

    /// Redirect pages under the output directory not written by this build.
    fn stale_pages(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.output_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|path| is_html(path) && !self.written.contains(path))
            .filter(|path| is_own_page(path))
            .collect()
    }

    /// Remove `dir` and its ancestors while empty, stopping at the output dir.
    fn remove_empty_dirs(&self, mut dir: &Path) {
        while dir != self.output_dir && dir.starts_with(&self.output_dir) {
            if fs::remove_dir(dir).is_err() {
                break;
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
    }

    /// `/old-url/` -> `{output_dir}/old-url/index.html`,
    /// `/old.html` -> `{output_dir}/old.html`
    pub fn output_path(&self, from_path: &str) -> Option<PathBuf> {
        let path = from_path.split(['?', '#']).next().unwrap_or(from_path);
        let relative = url_to_relative(path)?;
        let is_file = is_html(&relative);

        Some(if is_file && !path.ends_with('/') {
            self.output_dir.join(relative)
        } else {
            self.output_dir.join(relative).join("index.html")
        })
    }
}

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html" || ext == "htm")
}

/// Page carrying the generator marker, i.e. written by this sink.
fn is_own_page(path: &Path) -> bool {
    fs::read_to_string(path).is_ok_and(|content| content.contains(GENERATOR_MARKER))
}

/// A file there that we did not write (a live page) must stay.
fn is_foreign_file(path: &Path) -> bool {
    path.exists() && !is_own_page(path)
}

impl RegisterRedirect for HtmlRedirectWriter {
    fn register(&mut self, edge: &RedirectEdge) -> Result<()> {
        let Some(output_file) = self.output_path(&edge.from_path) else {
            bail!("refusing to write redirect outside output dir: {}", edge.from_path);
        };

        if is_foreign_file(&output_file) {
            log!("warning"; "{} is served by a page, skipping redirect to {}",
                edge.from_path, edge.to_path);
            return Ok(());
        }

        let vars = RedirectVars {
            canonical_url: &edge.to_path,
        };
        let written = REDIRECT_HTML
            .write_to(&vars, &output_file)
            .with_context(|| format!("Failed to write {}", output_file.display()))?;
        if written {
            debug!("redirect"; "{} -> {}", edge.from_path, edge.to_path);
        }
        self.written.insert(output_file);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let stale = self.stale_pages();
        for page in &stale {
            fs::remove_file(page)
                .with_context(|| format!("Failed to remove stale redirect {}", page.display()))?;
            debug!("prune"; "removed {}", page.display());
            if let Some(parent) = page.parent() {
                self.remove_empty_dirs(parent);
            }
        }
        if !stale.is_empty() {
            log!("prune"; "removed {}", plural_count(stale.len(), "stale redirect page"));
        }
        Ok(())
    }
}
