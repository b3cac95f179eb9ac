//! Redirect graph maintenance.
//!
//! Three pure steps, run by the build session:
//!
//! | Step                     | When                      | Effect                          |
//! |--------------------------|---------------------------|---------------------------------|
//! | [`update_redirects`]     | once per rendered page    | records a move as a new edge    |
//! | [`insert_edge`]          | inside `update_redirects` | reverse removal + chain collapse|
//! | [`filter_live_redirects`]| once after all pages      | prunes edges to deleted pages   |

mod edge;
mod graph;
mod live;
mod update;

pub use edge::{EdgeMaker, MakeEdge, RedirectEdge, RedirectSet};
pub use graph::insert_edge;
pub use live::filter_live_redirects;
pub use update::{insert_moved, moved_edge, update_redirects};
