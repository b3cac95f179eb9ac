//! Config field path used to anchor diagnostics.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path to a config field, e.g. `edge.status`.
///
/// Sections expose their validated fields as associated constants:
///
/// ```ignore
/// impl EdgeConfig {
///     pub const STATUS: FieldPath = FieldPath::new("edge.status");
/// }
///
/// diag.error(EdgeConfig::STATUS, "must be 3xx");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
