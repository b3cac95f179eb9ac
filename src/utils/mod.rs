//! Small helpers shared across commands.

pub mod html;
pub mod path;

/// Return "s" suffix for plural counts
///
/// - `plural_s(0)` -> `"s"` (0 redirects)
/// - `plural_s(1)` -> `""` (1 redirect)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// `plural_count(3, "page")` -> `"3 pages"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
