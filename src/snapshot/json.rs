//! JSON file snapshot store (`pages.json` + `redirects.json`).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{LoadSnapshot, SaveSnapshot, Snapshot, SnapshotError};
use crate::config::RedirectConfig;
use crate::core::PageTable;
use crate::redirect::RedirectSet;
use crate::{debug, log};

/// Stores the page table and redirect set as two pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    pub pages_file: PathBuf,
    pub redirects_file: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(pages_file: impl Into<PathBuf>, redirects_file: impl Into<PathBuf>) -> Self {
        Self {
            pages_file: pages_file.into(),
            redirects_file: redirects_file.into(),
        }
    }

    pub fn from_config(config: &RedirectConfig) -> Self {
        Self::new(&config.snapshot.pages, &config.snapshot.redirects)
    }
}

impl LoadSnapshot for JsonSnapshotStore {
    /// Reads both files concurrently. Each file falls back to its empty
    /// value on its own when missing or unreadable, so this never fails.
    fn load(&self) -> Result<Snapshot, SnapshotError> {
        let (pages, redirects) = rayon::join(
            || read_or_default::<PageTable>(&self.pages_file),
            || read_or_default::<RedirectSet>(&self.redirects_file),
        );

        debug!("snapshot"; "restored {} pages, {} redirects", pages.len(), redirects.len());
        Ok(Snapshot { pages, redirects })
    }
}

impl SaveSnapshot for JsonSnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let (pages, redirects) = rayon::join(
            || write_json(&snapshot.pages, &self.pages_file),
            || write_json(&snapshot.redirects, &self.redirects_file),
        );
        pages?;
        redirects?;

        debug!("snapshot"; "saved {} pages, {} redirects",
            snapshot.pages.len(), snapshot.redirects.len());
        Ok(())
    }
}

/// Read a JSON file. A missing file is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SnapshotError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SnapshotError::Read(path.to_path_buf(), err)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|err| SnapshotError::Parse(path.to_path_buf(), err))
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("snapshot"; "{} not found, starting empty", path.display());
            T::default()
        }
        Err(err) => {
            log!("warning"; "{}, starting empty", err);
            T::default()
        }
    }
}

/// Check if file content is the same as new content
fn file_content_matches(path: &Path, content: &str) -> bool {
    fs::read_to_string(path).is_ok_and(|existing| existing == content)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(value)?;

    if file_content_matches(path, &json) {
        debug!("snapshot"; "{} unchanged, skipping write", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| SnapshotError::Write(path.to_path_buf(), err))?;
    }
    fs::write(path, json).map_err(|err| SnapshotError::Write(path.to_path_buf(), err))
}
