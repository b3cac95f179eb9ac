//! Check report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// Problem categories, printed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueKind {
    /// A redirect lands on another redirect's source.
    Chain,
    /// Two redirects point at each other, or one points at itself.
    Cycle,
    /// The same source is redirected more than once.
    Duplicate,
    /// The destination is no known page.
    Dangling,
}

impl IssueKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chain => "chains",
            Self::Cycle => "cycles",
            Self::Duplicate => "duplicates",
            Self::Dangling => "dangling",
        }
    }
}

/// A single problem with one redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// The redirect, as `from -> to`.
    pub target: String,
    pub reason: String,
}

/// All problems found, grouped by kind.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub issues: BTreeMap<IssueKind, Vec<Issue>>,
}

impl CheckReport {
    pub fn add(&mut self, kind: IssueKind, target: String, reason: String) {
        self.issues
            .entry(kind)
            .or_default()
            .push(Issue { target, reason });
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.get(&kind).map_or(0, Vec::len)
    }

    pub fn total(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Print every section to stderr.
    pub fn print(&self) {
        for (kind, issues) in &self.issues {
            eprintln!();
            eprintln!(
                "{} {}",
                kind.name().red().bold(),
                format!("({} issue{})", issues.len(), plural_s(issues.len())).dimmed()
            );
            for issue in issues {
                if issue.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), issue.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), issue.target, issue.reason.dimmed());
                }
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total();
        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("issue{}", plural_s(total)).dimmed()
            )
        }
    }
}
