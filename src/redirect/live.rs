//! Pruning redirects that lead to deleted pages.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use super::{MakeEdge, RedirectSet};
use crate::core::PageTable;
use crate::debug;

/// Destinations of pages that existed last build but are gone now.
///
/// Each destination is what `maker` produces as `to_path` for the dead
/// page's own path, so custom constructors canonicalize it the same way
/// they canonicalize real redirects.
pub fn dead_destinations<M: MakeEdge + ?Sized>(
    prev_pages: &PageTable,
    pages: &PageTable,
    maker: &M,
) -> FxHashSet<String> {
    prev_pages
        .par_iter()
        .filter(|(page_id, _)| !pages.contains_key(*page_id))
        .map(|(page_id, path)| maker.make_edge(page_id, path, path).to_path)
        .collect()
}

/// Drop every redirect whose destination belongs to a deleted page.
///
/// Removal is by destination value, so the result does not depend on the
/// order deleted pages are visited. Survivors keep their relative order.
pub fn filter_live_redirects<M: MakeEdge + ?Sized>(
    prev_pages: &PageTable,
    pages: &PageTable,
    redirects: RedirectSet,
    maker: &M,
) -> RedirectSet {
    let dead = dead_destinations(prev_pages, pages, maker);
    if dead.is_empty() {
        return redirects;
    }

    redirects.retain(|edge| {
        let live = !dead.contains(&edge.to_path);
        if !live {
            debug!("prune"; "dropping {} (destination deleted)", edge);
        }
        live
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PageId;
    use crate::redirect::{EdgeMaker, RedirectEdge};

    struct PlainEdge;

    impl MakeEdge for PlainEdge {
        fn make_edge(&self, _: &PageId, from_path: &str, to_path: &str) -> RedirectEdge {
            RedirectEdge::new(from_path, to_path)
        }
    }

    fn pages(entries: &[(&str, &str)]) -> PageTable {
        entries
            .iter()
            .map(|(id, path)| (PageId::new(id), path.to_string()))
            .collect()
    }

    fn set(pairs: &[(&str, &str)]) -> RedirectSet {
        pairs.iter().map(|(from, to)| RedirectEdge::new(*from, *to)).collect()
    }

    #[test]
    fn test_empty_everything() {
        let result = filter_live_redirects(&pages(&[]), &pages(&[]), set(&[]), &PlainEdge);
        assert_eq!(result, set(&[]));
    }

    #[test]
    fn test_no_dead_redirects() {
        let redirects = set(&[("/a", "/b")]);
        let result = filter_live_redirects(
            &pages(&[("a", "/b")]),
            &pages(&[("a", "/b"), ("b", "/b")]),
            redirects.clone(),
            &PlainEdge,
        );
        assert_eq!(result, redirects);
    }

    #[test]
    fn test_one_dead_redirect() {
        let result = filter_live_redirects(
            &pages(&[("a", "/b"), ("c", "/c")]),
            &pages(&[("c", "/c")]),
            set(&[("/a", "/b")]),
            &PlainEdge,
        );
        assert_eq!(result, set(&[]));
    }

    #[test]
    fn test_more_than_one_dead_redirect() {
        let result = filter_live_redirects(
            &pages(&[("a", "/b"), ("c", "/d"), ("e", "/e")]),
            &pages(&[("e", "/e")]),
            set(&[("/a", "/b"), ("/c", "/d")]),
            &PlainEdge,
        );
        assert_eq!(result, set(&[]));
    }

    #[test]
    fn test_survivors_keep_order() {
        let result = filter_live_redirects(
            &pages(&[("gone", "/dead"), ("kept", "/live")]),
            &pages(&[("kept", "/live")]),
            set(&[("/1", "/live"), ("/2", "/dead"), ("/3", "/live"), ("/4", "/dead")]),
            &PlainEdge,
        );
        assert_eq!(result, set(&[("/1", "/live"), ("/3", "/live")]));
    }

    #[test]
    fn test_deletion_order_independent() {
        let redirects = set(&[("/a", "/x"), ("/b", "/y"), ("/c", "/z"), ("/d", "/x")]);
        let current = pages(&[("z", "/z")]);

        let expected = set(&[("/c", "/z")]);
        for prev in [
            pages(&[("x", "/x"), ("y", "/y"), ("z", "/z")]),
            pages(&[("y", "/y"), ("z", "/z"), ("x", "/x")]),
            pages(&[("z", "/z"), ("x", "/x"), ("y", "/y")]),
        ] {
            let result = filter_live_redirects(&prev, &current, redirects.clone(), &PlainEdge);
            assert_eq!(result, expected);
        }

        // Filtering one deleted page at a time lands in the same place.
        let step = filter_live_redirects(
            &pages(&[("y", "/y")]),
            &pages(&[]),
            redirects.clone(),
            &PlainEdge,
        );
        let step = filter_live_redirects(&pages(&[("x", "/x")]), &pages(&[]), step, &PlainEdge);
        assert_eq!(step, expected);
    }

    #[test]
    fn test_destination_uses_edge_maker() {
        // The stored page path is unnormalized; the redirect points at the
        // canonical form produced by the same maker.
        let maker = EdgeMaker {
            normalize: true,
            ..EdgeMaker::default()
        };
        let result = filter_live_redirects(
            &pages(&[("a", "/posts/hello")]),
            &pages(&[]),
            set(&[("/old/", "/posts/hello/"), ("/keep/", "/other/")]),
            &maker,
        );
        assert_eq!(result, set(&[("/keep/", "/other/")]));
    }

    #[test]
    fn test_load() {
        let prev: PageTable = (0..10_000)
            .map(|i| (PageId::new(format!("page-{i}")), format!("/page-{i}")))
            .collect();
        let current = prev.clone();
        let redirects: RedirectSet = (0..1_000)
            .map(|i| RedirectEdge::new(format!("/slug-{}", i * 2), format!("/slug-{}", i * 2 + 1)))
            .collect();

        let result = filter_live_redirects(&prev, &current, redirects.clone(), &PlainEdge);
        assert_eq!(result, redirects);
    }

    #[test]
    fn test_load_all_deleted() {
        let prev: PageTable = (0..10_000)
            .map(|i| (PageId::new(format!("page-{i}")), format!("/page-{i}")))
            .collect();
        let redirects: RedirectSet = (0..10_000)
            .map(|i| RedirectEdge::new(format!("/old-{i}"), format!("/page-{i}")))
            .collect();

        let result = filter_live_redirects(&prev, &PageTable::new(), redirects, &PlainEdge);
        assert!(result.is_empty());
    }
}
