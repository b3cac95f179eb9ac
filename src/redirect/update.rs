//! Per-page redirect updates.

use super::{MakeEdge, RedirectEdge, RedirectSet, insert_edge};
use crate::core::{PageId, PageTable};
use crate::{debug, log};

/// Previous path of `page_id` if the page existed last build under a
/// different path. New pages and unchanged paths give `None`.
#[inline]
pub fn moved_from<'a>(page_id: &PageId, path: &str, prev_pages: &'a PageTable) -> Option<&'a str> {
    prev_pages
        .get(page_id)
        .map(String::as_str)
        .filter(|prev_path| *prev_path != path)
}

/// Edge recording that `page_id` moved to `path`, if it did.
///
/// The edge comes from `maker`, so a move that `maker` maps onto a single
/// path (e.g. `/a` and `/a/` under normalization) yields `None` instead of
/// a self-loop.
pub fn moved_edge<M: MakeEdge + ?Sized>(
    page_id: &PageId,
    path: &str,
    prev_pages: &PageTable,
    maker: &M,
) -> Option<RedirectEdge> {
    let prev_path = moved_from(page_id, path, prev_pages)?;
    let edge = maker.make_edge(page_id, prev_path, path);
    if edge.from_path == edge.to_path {
        debug!("redirect"; "page id {} moved from {} to {}, same url after normalization",
            page_id, prev_path, path);
        return None;
    }
    Some(edge)
}

/// Fold one rendered page into the redirect set.
///
/// When the page moved since the previous build, the edge from
/// [`moved_edge`] is inserted with [`insert_edge`]. Otherwise the set comes
/// back unchanged.
pub fn update_redirects<M: MakeEdge + ?Sized>(
    page_id: &PageId,
    path: &str,
    prev_pages: &PageTable,
    redirects: RedirectSet,
    maker: &M,
) -> RedirectSet {
    match moved_edge(page_id, path, prev_pages, maker) {
        Some(edge) => insert_moved(page_id, edge, redirects),
        None => redirects,
    }
}

/// Log and insert an edge produced by [`moved_edge`].
pub fn insert_moved(page_id: &PageId, edge: RedirectEdge, redirects: RedirectSet) -> RedirectSet {
    log!("redirect"; "path changed for page id {}, new redirection from {} to {}",
        page_id, edge.from_path, edge.to_path);
    insert_edge(edge, redirects)
}
