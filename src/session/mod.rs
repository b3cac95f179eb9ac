//! One build's worth of redirect bookkeeping.
//!
//! ```text
//! begin ──► record_page × N ──► finish
//!   │            │                 ├── filter_live_redirects
//!   │            │                 ├── sink.register (each edge)
//!   │            │                 └── saver.save
//!   │            └── moved_edge + insert, pages[id] = path
//!   └── loader.load (falls back to empty)
//! ```
//!
//! Renderers running on several threads share a session through
//! [`SharedSession`], which serializes `record_page` behind a lock.

use parking_lot::Mutex;

use crate::core::{PageEvent, PageId, PageTable};
use crate::redirect::{MakeEdge, RedirectSet, filter_live_redirects, insert_moved, moved_edge};
use crate::sink::RegisterRedirect;
use crate::snapshot::{LoadSnapshot, SaveSnapshot, Snapshot};
use crate::log;

/// What recording one page did to the redirect set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// No page id in the context; the page is not tracked.
    Skipped,
    /// First time this page id is seen.
    New,
    /// Same path as last build.
    Unchanged,
    /// Path changed; a redirect `from -> to` was inserted.
    Moved { from: String, to: String },
}

/// Summary of a finished build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Pages recorded with an id.
    pub pages: usize,
    /// Pages without an id.
    pub skipped: usize,
    /// Pages whose path changed since the previous build.
    pub moved: usize,
    /// Redirects dropped because their destination page was deleted.
    pub pruned: usize,
    /// Redirects accepted by the sink.
    pub registered: usize,
    /// Redirects the sink rejected (including a failed flush).
    pub sink_failures: usize,
    /// Whether the snapshot was persisted.
    pub saved: bool,
    /// Final redirect set.
    pub redirects: RedirectSet,
}

/// Redirect state accumulated over one build.
#[derive(Debug)]
pub struct BuildSession<M: MakeEdge> {
    prev_pages: PageTable,
    pages: PageTable,
    redirects: RedirectSet,
    maker: M,
    page_id_property: String,
    skipped: usize,
    moved: usize,
}

impl<M: MakeEdge> BuildSession<M> {
    /// Start a build from the previous build's snapshot.
    ///
    /// A failing loader is not fatal: the build starts from scratch.
    pub fn begin(loader: &dyn LoadSnapshot, maker: M, page_id_property: impl Into<String>) -> Self {
        let snapshot = loader.load().unwrap_or_else(|err| {
            log!("warning"; "could not load previous snapshot, starting empty: {err}");
            Snapshot::default()
        });
        Self::from_snapshot(snapshot, maker, page_id_property)
    }

    pub fn from_snapshot(snapshot: Snapshot, maker: M, page_id_property: impl Into<String>) -> Self {
        Self {
            prev_pages: snapshot.pages,
            pages: PageTable::new(),
            redirects: snapshot.redirects,
            maker,
            page_id_property: page_id_property.into(),
            skipped: 0,
            moved: 0,
        }
    }

    /// Record one rendered page.
    pub fn record_page(&mut self, page: &PageEvent) -> PageOutcome {
        match page.page_id(&self.page_id_property) {
            Some(page_id) => self.record(page_id, &page.path),
            None => {
                log!("redirect"; "page.context.{} missing for path {}, page will not be redirected automatically",
                    self.page_id_property, page.path);
                self.skipped += 1;
                PageOutcome::Skipped
            }
        }
    }

    /// Record a page whose id is already known.
    ///
    /// A move the edge constructor maps onto the same url counts as
    /// `Unchanged`.
    pub fn record(&mut self, page_id: PageId, path: &str) -> PageOutcome {
        let outcome = match moved_edge(&page_id, path, &self.prev_pages, &self.maker) {
            Some(edge) => {
                let outcome = PageOutcome::Moved {
                    from: edge.from_path.clone(),
                    to: edge.to_path.clone(),
                };
                self.moved += 1;
                let redirects = std::mem::take(&mut self.redirects);
                self.redirects = insert_moved(&page_id, edge, redirects);
                outcome
            }
            None if self.prev_pages.contains_key(&page_id) => PageOutcome::Unchanged,
            None => PageOutcome::New,
        };

        self.pages.insert(page_id, path.to_owned());
        outcome
    }

    pub fn prev_pages(&self) -> &PageTable {
        &self.prev_pages
    }

    pub fn pages(&self) -> &PageTable {
        &self.pages
    }

    pub fn redirects(&self) -> &RedirectSet {
        &self.redirects
    }

    /// Drop redirects into pages that were not rendered this build.
    ///
    /// Returns the number of redirects removed.
    pub fn prune(&mut self) -> usize {
        let before = self.redirects.len();
        let redirects = std::mem::take(&mut self.redirects);
        self.redirects = filter_live_redirects(&self.prev_pages, &self.pages, redirects, &self.maker);
        before - self.redirects.len()
    }

    /// Prune, register every final redirect and persist the snapshot.
    ///
    /// Sink and save failures are logged and reported, never returned.
    pub fn finish(mut self, sink: &mut dyn RegisterRedirect, saver: &dyn SaveSnapshot) -> BuildReport {
        let pruned = self.prune();
        if pruned > 0 {
            log!("prune"; "dropped {} redirect{} to deleted pages", pruned, crate::utils::plural_s(pruned));
        }

        let mut registered = 0;
        let mut sink_failures = 0;
        for edge in &self.redirects {
            match sink.register(edge) {
                Ok(()) => registered += 1,
                Err(err) => {
                    log!("error"; "failed to register {}: {:#}", edge, err);
                    sink_failures += 1;
                }
            }
        }
        if let Err(err) = sink.flush() {
            log!("error"; "failed to write redirects: {:#}", err);
            sink_failures += 1;
        }

        let snapshot = Snapshot {
            pages: self.pages,
            redirects: self.redirects,
        };
        let saved = match saver.save(&snapshot) {
            Ok(()) => true,
            Err(err) => {
                log!("error"; "failed to save snapshot: {err}");
                false
            }
        };

        BuildReport {
            pages: snapshot.pages.len(),
            skipped: self.skipped,
            moved: self.moved,
            pruned,
            registered,
            sink_failures,
            saved,
            redirects: snapshot.redirects,
        }
    }
}

/// A [`BuildSession`] that several render threads can record into.
///
/// Library API for hosts that render pages in parallel. Recording order
/// then follows lock order, so the redirect set's order is only as stable
/// as the host's scheduling. The `build` command records sequentially in
/// manifest order and uses [`BuildSession`] directly.
#[derive(Debug)]
pub struct SharedSession<M: MakeEdge> {
    inner: Mutex<BuildSession<M>>,
}

impl<M: MakeEdge> SharedSession<M> {
    pub fn new(session: BuildSession<M>) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    pub fn record_page(&self, page: &PageEvent) -> PageOutcome {
        self.inner.lock().record_page(page)
    }

    pub fn into_inner(self) -> BuildSession<M> {
        self.inner.into_inner()
    }

    pub fn finish(self, sink: &mut dyn RegisterRedirect, saver: &dyn SaveSnapshot) -> BuildReport {
        self.into_inner().finish(sink, saver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JsonMap;
    use crate::redirect::{EdgeMaker, RedirectEdge};
    use crate::snapshot::{JsonSnapshotStore, SnapshotError};
    use anyhow::bail;
    use rayon::prelude::*;
    use serde_json::json;
    use std::path::PathBuf;

    /// In-memory snapshot store.
    #[derive(Default)]
    struct MemoryStore {
        snapshot: Mutex<Snapshot>,
    }

    impl LoadSnapshot for MemoryStore {
        fn load(&self) -> Result<Snapshot, SnapshotError> {
            Ok(self.snapshot.lock().clone())
        }
    }

    impl SaveSnapshot for MemoryStore {
        fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
            *self.snapshot.lock() = snapshot.clone();
            Ok(())
        }
    }

    struct Unreadable;

    impl LoadSnapshot for Unreadable {
        fn load(&self) -> Result<Snapshot, SnapshotError> {
            Err(SnapshotError::Read(
                PathBuf::from("pages.json"),
                std::io::Error::other("permission denied"),
            ))
        }
    }

    impl SaveSnapshot for Unreadable {
        fn save(&self, _snapshot: &Snapshot) -> Result<(), SnapshotError> {
            Err(SnapshotError::Write(
                PathBuf::from("pages.json"),
                std::io::Error::other("read-only filesystem"),
            ))
        }
    }

    /// Sink that rejects edges into `/broken/`.
    #[derive(Default)]
    struct PickySink {
        accepted: Vec<RedirectEdge>,
    }

    impl RegisterRedirect for PickySink {
        fn register(&mut self, edge: &RedirectEdge) -> anyhow::Result<()> {
            if edge.to_path == "/broken/" {
                bail!("cannot serve {}", edge.to_path);
            }
            self.accepted.push(edge.clone());
            Ok(())
        }
    }

    fn page(path: &str, id: &str) -> PageEvent {
        let serde_json::Value::Object(context) = json!({ "id": id }) else {
            unreachable!()
        };
        PageEvent::new(path, context)
    }

    fn build(store: &MemoryStore, pages: &[PageEvent]) -> (BuildReport, Vec<RedirectEdge>) {
        let mut session = BuildSession::begin(store, EdgeMaker::default(), "id");
        for p in pages {
            session.record_page(p);
        }
        let mut sink: Vec<RedirectEdge> = Vec::new();
        let report = session.finish(&mut sink, store);
        (report, sink)
    }

    fn pairs(edges: &[RedirectEdge]) -> Vec<(&str, &str)> {
        edges
            .iter()
            .map(|e| (e.from_path.as_str(), e.to_path.as_str()))
            .collect()
    }

    #[test]
    fn test_outcomes() {
        let snapshot = Snapshot {
            pages: PageTable::from([
                (PageId::from("1"), "/a/".to_string()),
                (PageId::from("2"), "/b/".to_string()),
            ]),
            redirects: RedirectSet::new(),
        };
        let mut session = BuildSession::from_snapshot(snapshot, EdgeMaker::default(), "id");

        assert_eq!(session.record_page(&page("/a/", "1")), PageOutcome::Unchanged);
        assert_eq!(
            session.record_page(&page("/b2/", "2")),
            PageOutcome::Moved {
                from: "/b/".into(),
                to: "/b2/".into()
            }
        );
        assert_eq!(session.record_page(&page("/c/", "3")), PageOutcome::New);
        assert_eq!(
            session.record_page(&PageEvent::new("/anon/", JsonMap::new())),
            PageOutcome::Skipped
        );

        assert_eq!(session.pages().len(), 3);
        assert_eq!(session.prev_pages().len(), 2);
        assert_eq!(pairs(session.redirects().as_slice()), [("/b/", "/b2/")]);
    }

    #[test]
    fn test_normalized_same_url_is_unchanged() {
        let snapshot = Snapshot {
            pages: PageTable::from([(PageId::from("p"), "/a".to_string())]),
            redirects: RedirectSet::new(),
        };
        let maker = EdgeMaker {
            normalize: true,
            ..EdgeMaker::default()
        };
        let mut session = BuildSession::from_snapshot(snapshot, maker, "id");

        assert_eq!(session.record(PageId::from("p"), "/a/"), PageOutcome::Unchanged);
        assert!(session.redirects().is_empty());

        let report = session.finish(&mut Vec::<RedirectEdge>::new(), &MemoryStore::default());
        assert_eq!(report.moved, 0);
        assert!(report.redirects.iter().all(|e| e.from_path != e.to_path));
    }

    #[test]
    fn test_two_builds_round_trip() {
        let store = MemoryStore::default();

        let (first, sink) = build(&store, &[page("/a/", "1"), page("/b/", "2")]);
        assert_eq!(first.pages, 2);
        assert!(first.saved);
        assert!(sink.is_empty());

        let (second, sink) = build(&store, &[page("/a-new/", "1"), page("/b/", "2")]);
        assert_eq!(second.moved, 1);
        assert_eq!(second.registered, 1);
        assert_eq!(pairs(&sink), [("/a/", "/a-new/")]);
        assert!(sink[0].is_permanent());

        // Third build moves it again: the old redirect collapses.
        let (third, sink) = build(&store, &[page("/a-final/", "1"), page("/b/", "2")]);
        assert_eq!(third.moved, 1);
        assert_eq!(pairs(&sink), [("/a/", "/a-final/"), ("/a-new/", "/a-final/")]);

        let saved = store.load().unwrap();
        assert_eq!(saved.pages.get(&PageId::from("1")).unwrap(), "/a-final/");
        assert_eq!(saved.redirects, third.redirects);
    }

    #[test]
    fn test_missing_id_skipped() {
        let store = MemoryStore::default();
        let anon = PageEvent::new("/anon/", JsonMap::new());
        let (report, _) = build(&store, &[anon, page("/a/", "1")]);

        assert_eq!(report.skipped, 1);
        assert_eq!(report.pages, 1);
        assert!(!store.load().unwrap().pages.values().any(|p| p == "/anon/"));
    }

    #[test]
    fn test_deleted_page_pruned() {
        let store = MemoryStore::default();
        build(&store, &[page("/a/", "1"), page("/b/", "2")]);
        build(&store, &[page("/a2/", "1"), page("/b/", "2")]);

        // Page 1 is gone: the redirect into it goes too.
        let (report, sink) = build(&store, &[page("/b/", "2")]);
        assert_eq!(report.pruned, 1);
        assert!(sink.is_empty());
        assert!(store.load().unwrap().redirects.is_empty());
    }

    #[test]
    fn test_sink_failures_counted() {
        let snapshot = Snapshot {
            pages: PageTable::from([
                (PageId::from("1"), "/a/".to_string()),
                (PageId::from("2"), "/b/".to_string()),
            ]),
            redirects: RedirectSet::new(),
        };
        let mut session = BuildSession::from_snapshot(snapshot, EdgeMaker::default(), "id");
        session.record_page(&page("/broken/", "1"));
        session.record_page(&page("/fine/", "2"));

        let mut sink = PickySink::default();
        let store = MemoryStore::default();
        let report = session.finish(&mut sink, &store);

        assert_eq!(report.registered, 1);
        assert_eq!(report.sink_failures, 1);
        assert_eq!(pairs(&sink.accepted), [("/b/", "/fine/")]);
        // The snapshot still keeps both.
        assert_eq!(store.load().unwrap().redirects.len(), 2);
    }

    #[test]
    fn test_unreadable_snapshot_falls_back() {
        let mut session = BuildSession::begin(&Unreadable, EdgeMaker::default(), "id");
        assert_eq!(session.record_page(&page("/a/", "1")), PageOutcome::New);

        let report = session.finish(&mut Vec::<RedirectEdge>::new(), &Unreadable);
        assert!(!report.saved);
        assert_eq!(report.pages, 1);
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("pages.json"), dir.path().join("redirects.json"));

        let mut session = BuildSession::begin(&store, EdgeMaker::default(), "id");
        session.record_page(&page("/old/", "1"));
        session.finish(&mut Vec::<RedirectEdge>::new(), &store);

        let mut session = BuildSession::begin(&store, EdgeMaker::default(), "id");
        session.record_page(&page("/new/", "1"));
        let report = session.finish(&mut Vec::<RedirectEdge>::new(), &store);

        assert_eq!(pairs(report.redirects.as_slice()), [("/old/", "/new/")]);
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("redirects.json")).unwrap())
                .unwrap();
        assert_eq!(
            on_disk,
            json!([{ "fromPath": "/old/", "toPath": "/new/", "isPermanent": true }])
        );
    }

    #[test]
    fn test_shared_session_parallel_record() {
        let prev: PageTable = (0..1000)
            .map(|i| (PageId::new(i.to_string()), format!("/old-{i}/")))
            .collect();
        let snapshot = Snapshot {
            pages: prev,
            redirects: RedirectSet::new(),
        };
        let shared = SharedSession::new(BuildSession::from_snapshot(snapshot, EdgeMaker::default(), "id"));

        let moved = (0..1000)
            .into_par_iter()
            .filter(|i| {
                let outcome = shared.record_page(&page(&format!("/new-{i}/"), &i.to_string()));
                matches!(outcome, PageOutcome::Moved { .. })
            })
            .count();
        assert_eq!(moved, 1000);

        let report = shared.finish(&mut Vec::<RedirectEdge>::new(), &MemoryStore::default());
        assert_eq!(report.pages, 1000);
        assert_eq!(report.redirects.len(), 1000);
        assert!(report.redirects.iter().all(|e| e.to_path.starts_with("/new-")));
    }
}
