//! Commit creation and history traversal
//!
//! - `commit_graph`: records commits on top of HEAD
//! - `rev_list`: lazy first-parent walk from a starting commit

pub mod commit_graph;
pub mod rev_list;
