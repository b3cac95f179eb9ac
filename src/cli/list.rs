//! `list`: print the persisted redirects.

use anyhow::{Context, Result};

use super::ListArgs;
use super::common::write_output;
use crate::config::RedirectConfig;
use crate::redirect::RedirectSet;
use crate::snapshot::read_json;

/// Render the persisted redirect set as JSON.
pub fn render_redirects(config: &RedirectConfig, pretty: bool) -> Result<String> {
    let redirects: RedirectSet = read_json(&config.snapshot.redirects)?.unwrap_or_default();
    let rendered = if pretty {
        serde_json::to_string_pretty(&redirects)
    } else {
        serde_json::to_string(&redirects)
    };
    rendered.context("Failed to serialize redirects")
}

pub fn run_list(config: &RedirectConfig, args: &ListArgs) -> Result<()> {
    let rendered = render_redirects(config, args.pretty)?;
    write_output(&rendered, args.output.as_deref(), "list")
}
