//! `build`: fold one build's pages into the redirect snapshot.
//!
//! Pages are recorded in manifest order, then the session prunes redirects
//! into deleted pages, registers the rest with the configured sink and
//! persists the snapshot.

use std::path::Path;

use anyhow::Result;

use super::common::read_manifest;
use crate::config::RedirectConfig;
use crate::session::{BuildReport, BuildSession};
use crate::sink::{NoopSink, sink_for};
use crate::snapshot::{DiscardSnapshot, JsonSnapshotStore};
use crate::utils::plural_count;
use crate::{debug, log};

/// Run one build session against the configured snapshot and sink.
///
/// With `dry`, redirects are computed and logged but nothing is written.
pub fn run_build(config: &RedirectConfig, manifest: &Path, dry: bool) -> Result<BuildReport> {
    let pages = read_manifest(manifest)?;
    debug!("build"; "manifest lists {}", plural_count(pages.len(), "page"));

    let store = JsonSnapshotStore::from_config(config);
    let mut session = BuildSession::begin(&store, config.edge.edge_maker(), &config.snapshot.page_id);
    for page in &pages {
        session.record_page(page);
    }

    let report = if dry {
        let report = session.finish(&mut NoopSink, &DiscardSnapshot);
        for edge in &report.redirects {
            log!("redirect"; "{edge}");
        }
        log!("build"; "dry run, nothing written");
        report
    } else {
        let mut sink = sink_for(&config.output);
        session.finish(sink.as_mut(), &store)
    };

    log_summary(&report);
    Ok(report)
}

fn log_summary(report: &BuildReport) {
    if report.skipped > 0 {
        log!("warning"; "{} without a page id", plural_count(report.skipped, "page"));
    }
    if report.sink_failures > 0 {
        log!("warning"; "{} could not be registered", plural_count(report.sink_failures, "redirect"));
    }
    log!("done"; "{}, {} moved, {} active",
        plural_count(report.pages, "page"),
        report.moved,
        plural_count(report.redirects.len(), "redirect"));
}
