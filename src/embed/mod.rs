//! Embedded templates.
//!
//! ```ignore
//! use embed::build::{REDIRECT_HTML, RedirectVars};
//!
//! let html = REDIRECT_HTML.render(&RedirectVars { canonical_url: "/new-url/" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod build {
    use super::{Template, TemplateVars};
    use crate::utils::html::escape_attr;

    /// Marker identifying pages written by the HTML redirect sink.
    pub const GENERATOR_MARKER: &str = r#"<meta name="generator" content="autoredirect">"#;

    /// Variables for redirect.html template.
    pub struct RedirectVars<'a> {
        pub canonical_url: &'a str,
    }

    impl TemplateVars for RedirectVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__CANONICAL_URL__", &escape_attr(self.canonical_url))
        }
    }

    /// Meta-refresh page served at an old path.
    pub const REDIRECT_HTML: Template<RedirectVars<'static>> =
        Template::new(include_str!("build/redirect.html"));
}

#[cfg(test)]
mod tests {
    use super::build::*;

    #[test]
    fn test_redirect_template() {
        let html = REDIRECT_HTML.render(&RedirectVars {
            canonical_url: "/new-url/",
        });
        assert!(html.contains(r#"content="0; url=/new-url/""#));
        assert!(html.contains(r#"<link rel="canonical" href="/new-url/">"#));
        assert!(html.contains(GENERATOR_MARKER));
        assert!(!html.contains("__CANONICAL_URL__"));
    }

    #[test]
    fn test_redirect_template_escapes_url() {
        let html = REDIRECT_HTML.render(&RedirectVars {
            canonical_url: r#"/a"><script>/"#,
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("/a&quot;&gt;&lt;script&gt;/"));
    }
}
