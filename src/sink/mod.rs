//! Where final redirects get registered for serving.
//!
//! | Format    | Sink                   | Output                                   |
//! |-----------|------------------------|------------------------------------------|
//! | `html`    | [`HtmlRedirectWriter`] | `{dir}/{old-path}/index.html` meta refresh |
//! | `netlify` | [`NetlifyRedirects`]   | one `{dir}/_redirects` file              |
//! | `none`    | [`NoopSink`]           | nothing                                  |

mod html;
mod netlify;

use anyhow::Result;

use crate::config::{OutputConfig, OutputFormat};
use crate::redirect::RedirectEdge;

pub use html::HtmlRedirectWriter;
pub use netlify::NetlifyRedirects;

/// Receives each redirect of the final set, in order.
pub trait RegisterRedirect {
    fn register(&mut self, edge: &RedirectEdge) -> Result<()>;

    /// Called once after the last edge.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that registers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl RegisterRedirect for NoopSink {
    fn register(&mut self, _edge: &RedirectEdge) -> Result<()> {
        Ok(())
    }
}

/// Collects edges in memory.
impl RegisterRedirect for Vec<RedirectEdge> {
    fn register(&mut self, edge: &RedirectEdge) -> Result<()> {
        self.push(edge.clone());
        Ok(())
    }
}

/// Build the sink selected by the `[output]` section.
pub fn sink_for(output: &OutputConfig) -> Box<dyn RegisterRedirect> {
    match output.format {
        OutputFormat::Html => Box::new(HtmlRedirectWriter::new(&output.dir)),
        OutputFormat::Netlify => Box::new(NetlifyRedirects::new(output.dir.join(&output.file))),
        OutputFormat::None => Box::new(NoopSink),
    }
}
