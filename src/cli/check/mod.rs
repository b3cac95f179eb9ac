//! `check`: audit the persisted redirects.
//!
//! The insertion rules keep the set free of chains, cycles and duplicate
//! pairs; this command catches snapshots edited by hand or written by
//! something else, and redirects whose destination no longer exists.

mod report;

use anyhow::{Context, Result, bail};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cli::CheckArgs;
use crate::config::RedirectConfig;
use crate::core::PageTable;
use crate::log;
use crate::redirect::{MakeEdge, RedirectSet};
use crate::snapshot::read_json;
use crate::utils::plural_count;

pub use report::{CheckReport, IssueKind};

/// Check the persisted snapshot and fail when anything is off.
pub fn run_check(config: &RedirectConfig, args: &CheckArgs) -> Result<()> {
    let pages: PageTable = read_json(&config.snapshot.pages)
        .context("Failed to read page snapshot")?
        .unwrap_or_default();
    let redirects: RedirectSet = read_json(&config.snapshot.redirects)
        .context("Failed to read redirect snapshot")?
        .unwrap_or_default();

    if redirects.is_empty() {
        log!("check"; "no redirects recorded");
        return Ok(());
    }
    log!("check"; "checking {} against {}",
        plural_count(redirects.len(), "redirect"),
        plural_count(pages.len(), "page"));

    let report = check_redirects(&pages, &redirects, &config.edge.edge_maker());
    report.print();

    if report.is_empty() {
        log!("check"; "{report}");
        return Ok(());
    }
    if args.warn_only {
        log!("warning"; "{report}");
        return Ok(());
    }
    bail!("check failed: {}", plural_count(report.total(), "issue"))
}

/// Find chains, cycles, duplicate sources and dangling destinations.
///
/// Page paths go through `maker` before being compared with destinations,
/// so normalized edges are matched against normalized page paths.
pub fn check_redirects<M: MakeEdge + ?Sized>(
    pages: &PageTable,
    redirects: &RedirectSet,
    maker: &M,
) -> CheckReport {
    let mut report = CheckReport::default();

    let mut by_source: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for edge in redirects {
        let targets = by_source.entry(edge.from_path.as_str()).or_default();
        if !targets.contains(&edge.to_path.as_str()) {
            targets.push(edge.to_path.as_str());
        }
    }
    let live: FxHashSet<String> = pages
        .iter()
        .map(|(id, path)| maker.make_edge(id, path, path).to_path)
        .collect();

    let mut seen_pairs: FxHashSet<(&str, &str)> = FxHashSet::default();
    for edge in redirects {
        let (from, to) = (edge.from_path.as_str(), edge.to_path.as_str());

        if !seen_pairs.insert((from, to)) {
            report.add(IssueKind::Duplicate, edge.to_string(), "listed more than once".into());
        } else if by_source.get(from).is_some_and(|targets| targets.len() > 1) {
            report.add(IssueKind::Duplicate, edge.to_string(), "source has several destinations".into());
        }

        if from == to {
            report.add(IssueKind::Cycle, edge.to_string(), "redirects to itself".into());
        } else if let Some(next) = by_source.get(to) {
            if next.contains(&from) {
                // Report each two-way pair once.
                if from < to {
                    report.add(IssueKind::Cycle, edge.to_string(), format!("{to} redirects back"));
                }
            } else {
                report.add(IssueKind::Chain, edge.to_string(), format!("continues to {}", next.join(", ")));
            }
        }

        if !live.contains(to) && !by_source.contains_key(to) {
            report.add(IssueKind::Dangling, edge.to_string(), "destination is no known page".into());
        }
    }

    report
}
