//! Single-hop redirect graph maintenance.

use super::{RedirectEdge, RedirectSet};

/// Insert `new_edge`, keeping every redirect a single hop.
///
/// 1. Drop the exact reverse of `new_edge` (`a -> b` when adding `b -> a`).
/// 2. Point every remaining edge that ends at `new_edge.from_path` to
///    `new_edge.to_path` instead (`a -> b` + `b -> c` gives `a -> c`).
/// 3. Append `new_edge`, replacing an edge with the same `(from, to)` pair.
///
/// Survivors keep their relative order and the new edge lands last.
/// Inserting the same edge twice yields the same set as inserting it once.
pub fn insert_edge(new_edge: RedirectEdge, edges: RedirectSet) -> RedirectSet {
    let mut result: Vec<RedirectEdge> = edges
        .into_vec()
        .into_iter()
        .filter(|edge| !edge.is_reverse_of(&new_edge))
        .map(|mut edge| {
            if edge.to_path == new_edge.from_path {
                edge.to_path.clone_from(&new_edge.to_path);
            }
            edge
        })
        .filter(|edge| !edge.same_pair(&new_edge))
        .collect();

    result.push(new_edge);
    RedirectSet::from(result)
}
