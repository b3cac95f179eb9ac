//! Page identity and per-build page tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A JSON object map for free-form page context and edge metadata.
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// Stable cross-build identifier of a logical page (e.g. a CMS content id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(Arc<str>);

impl PageId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Resolve the identifier stored under `key` in a page context.
    ///
    /// Non-empty strings are used as-is and numbers by their JSON text.
    /// Anything else (absent, null, bool, empty string, arrays, objects)
    /// means the page has no identifier.
    pub fn from_context(context: &JsonMap, key: &str) -> Option<Self> {
        match context.get(key)? {
            JsonValue::String(s) if !s.is_empty() => Some(Self::new(s)),
            JsonValue::Number(n) => Some(Self::new(n.to_string())),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// PageId -> rendered path for one build.
///
/// Sorted so persisted snapshots diff cleanly between builds.
pub type PageTable = BTreeMap<PageId, String>;

/// One rendered page as reported by the host build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEvent {
    /// Path the page is served at in this build.
    pub path: String,
    /// Free-form page context; the page id is looked up here.
    #[serde(default)]
    pub context: JsonMap,
}

impl PageEvent {
    pub fn new(path: impl Into<String>, context: JsonMap) -> Self {
        Self {
            path: path.into(),
            context,
        }
    }

    /// Resolve this page's identifier using the configured property name.
    #[inline]
    pub fn page_id(&self, property: &str) -> Option<PageId> {
        PageId::from_context(&self.context, property)
    }
}
