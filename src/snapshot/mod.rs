//! Build-to-build snapshot of page paths and redirects.
//!
//! A snapshot is read once before the first page is recorded and written
//! once after pruning. Both directions go through small capability traits
//! so the session never touches the filesystem directly.

mod json;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PageTable;
use crate::redirect::RedirectSet;

pub use json::{JsonSnapshotStore, read_json};

/// Pages and redirects as left behind by one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub pages: PageTable,
    #[serde(default)]
    pub redirects: RedirectSet,
}

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error when reading `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid snapshot json in `{0}`")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("IO error when writing `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("failed to serialize snapshot")]
    Serialize(#[from] serde_json::Error),
}

/// Source of the previous build's snapshot.
pub trait LoadSnapshot {
    fn load(&self) -> Result<Snapshot, SnapshotError>;
}

/// Destination of this build's snapshot.
pub trait SaveSnapshot {
    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

/// Saver that drops the snapshot (dry runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSnapshot;

impl SaveSnapshot for DiscardSnapshot {
    fn save(&self, _snapshot: &Snapshot) -> Result<(), SnapshotError> {
        Ok(())
    }
}
