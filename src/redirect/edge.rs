//! Redirect edges, the ordered redirect set, and edge construction.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::{JsonMap, PageId, UrlPath};

/// Key of the permanence flag inside edge metadata.
pub const IS_PERMANENT: &str = "isPermanent";
/// Key of the optional explicit HTTP status inside edge metadata.
pub const STATUS_CODE: &str = "statusCode";

/// A directed redirect from an old path to a new path.
///
/// Graph operations only look at `from_path`/`to_path`; everything else
/// rides along in `data` and is serialized flat next to them:
///
/// ```json
/// { "fromPath": "/old/", "toPath": "/new/", "isPermanent": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectEdge {
    pub from_path: String,
    pub to_path: String,
    /// Caller-supplied metadata (permanence, status code, conditions).
    #[serde(flatten)]
    pub data: JsonMap,
}

impl RedirectEdge {
    /// Edge without metadata.
    pub fn new(from_path: impl Into<String>, to_path: impl Into<String>) -> Self {
        Self {
            from_path: from_path.into(),
            to_path: to_path.into(),
            data: JsonMap::new(),
        }
    }

    /// Attach one metadata field.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Same `(from, to)` identity, ignoring metadata.
    #[inline]
    pub fn same_pair(&self, other: &Self) -> bool {
        self.from_path == other.from_path && self.to_path == other.to_path
    }

    /// `self` is `b -> a` where `other` is `a -> b`.
    #[inline]
    pub fn is_reverse_of(&self, other: &Self) -> bool {
        self.to_path == other.from_path && self.from_path == other.to_path
    }

    /// Permanence flag from metadata; absent means temporary.
    pub fn is_permanent(&self) -> bool {
        self.data
            .get(IS_PERMANENT)
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }

    /// HTTP status to serve: explicit `statusCode`, else 301/302 by permanence.
    pub fn status_code(&self) -> u16 {
        self.data
            .get(STATUS_CODE)
            .and_then(JsonValue::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(if self.is_permanent() { 301 } else { 302 })
    }
}

impl std::fmt::Display for RedirectEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from_path, self.to_path)
    }
}

/// Ordered redirect edges, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectSet(Vec<RedirectEdge>);

impl RedirectSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RedirectEdge> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[RedirectEdge] {
        &self.0
    }

    /// Keep only edges matching the predicate, preserving order.
    pub fn retain(mut self, keep: impl FnMut(&RedirectEdge) -> bool) -> Self {
        self.0.retain(keep);
        self
    }

    pub(super) fn into_vec(self) -> Vec<RedirectEdge> {
        self.0
    }
}

impl From<Vec<RedirectEdge>> for RedirectSet {
    fn from(edges: Vec<RedirectEdge>) -> Self {
        Self(edges)
    }
}

impl FromIterator<RedirectEdge> for RedirectSet {
    fn from_iter<I: IntoIterator<Item = RedirectEdge>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RedirectSet {
    type Item = &'a RedirectEdge;
    type IntoIter = std::slice::Iter<'a, RedirectEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds the edge recorded when a page moves.
///
/// Implementations must be deterministic: pruning rebuilds the edge for
/// `(id, path, path)` and matches on the resulting `to_path`.
pub trait MakeEdge: Sync {
    fn make_edge(&self, page_id: &PageId, from_path: &str, to_path: &str) -> RedirectEdge;
}

/// Default edge constructor, driven by the `[edge]` config section.
#[derive(Debug, Clone)]
pub struct EdgeMaker {
    /// Value of `isPermanent` on every edge.
    pub permanent: bool,
    /// Optional explicit `statusCode`.
    pub status: Option<u16>,
    /// Canonicalize both endpoints as page URLs.
    pub normalize: bool,
}

impl Default for EdgeMaker {
    fn default() -> Self {
        Self {
            permanent: true,
            status: None,
            normalize: false,
        }
    }
}

impl EdgeMaker {
    fn endpoint(&self, path: &str) -> String {
        if self.normalize {
            UrlPath::from_page(path).into_string()
        } else {
            path.to_string()
        }
    }
}

impl MakeEdge for EdgeMaker {
    fn make_edge(&self, _page_id: &PageId, from_path: &str, to_path: &str) -> RedirectEdge {
        let edge = RedirectEdge::new(self.endpoint(from_path), self.endpoint(to_path))
            .with_data(IS_PERMANENT, self.permanent);
        match self.status {
            Some(status) => edge.with_data(STATUS_CODE, status),
            None => edge,
        }
    }
}
