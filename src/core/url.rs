//! Canonical page URL paths.
//!
//! - Internal representation: always decoded (human-readable)
//! - Output boundary: encode when writing whitespace-separated formats

use std::sync::OnceLock;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Bytes that must be escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Decoded page URL path
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Always ends with `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(String);

impl UrlPath {
    /// Create page URL (with trailing slash). Normalizes leading/trailing slashes,
    /// strips query string and fragment, resolves dot segments.
    pub fn from_page(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed == "/" {
            return Self("/".to_string());
        }

        let path = Self::strip_query_fragment(trimmed);

        let with_leading = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        let normalized = if with_leading.ends_with('/') {
            with_leading
        } else {
            format!("{with_leading}/")
        };

        Self(normalized)
    }

    /// Strip query string and fragment from a path using url crate.
    fn strip_query_fragment(path: &str) -> String {
        static BASE: OnceLock<Option<url::Url>> = OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").ok());

        match base.as_ref().map(|b| b.join(path)) {
            Some(Ok(parsed)) => percent_decode_str(parsed.path())
                .decode_utf8()
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| parsed.path().to_string()),
            _ => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Percent-encode a decoded path segment by segment, keeping `/` intact.
///
/// Needed wherever paths are written into whitespace-separated files.
pub fn encode_path(decoded: &str) -> String {
    decoded
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_page() {
        let url = UrlPath::from_page("/posts/hello/");
        assert_eq!(url.as_str(), "/posts/hello/");
    }

    #[test]
    fn test_from_page_root() {
        assert_eq!(UrlPath::from_page("").as_str(), "/");
        assert_eq!(UrlPath::from_page(" / ").as_str(), "/");
    }

    #[test]
    fn test_from_page_adds_slashes() {
        assert_eq!(UrlPath::from_page("posts/hello").as_str(), "/posts/hello/");
    }

    #[test]
    fn test_from_page_strips_query_and_fragment() {
        assert_eq!(UrlPath::from_page("/posts/hello?v=1").as_str(), "/posts/hello/");
        assert_eq!(UrlPath::from_page("/posts/hello#top").as_str(), "/posts/hello/");
        assert_eq!(
            UrlPath::from_page("/posts/hello?v=1#top").as_str(),
            "/posts/hello/"
        );
    }

    #[test]
    fn test_from_page_decodes() {
        let url = UrlPath::from_page("/posts/%E4%B8%AD%E6%96%87");
        assert_eq!(url.as_str(), "/posts/中文/");
        let url = UrlPath::from_page("/posts/hello world/");
        assert_eq!(url.as_str(), "/posts/hello world/");
    }

    #[test]
    fn test_from_page_resolves_dot_segments() {
        assert_eq!(UrlPath::from_page("/a/./b/../c").as_str(), "/a/c/");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/posts/hello world/"), "/posts/hello%20world/");
        assert_eq!(encode_path("/posts/中文/"), "/posts/%E4%B8%AD%E6%96%87/");
        assert_eq!(encode_path("/a-b/c.html"), "/a-b/c.html");
    }
}
