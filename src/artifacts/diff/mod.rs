//! Diff algorithms and tree comparison
//!
//! - `myers`: Myers' diff for line-by-line comparison
//! - `hunk`: grouping of edit scripts into unified hunks
//! - `diff_target`: abstraction over diff sources (workspace, index, commits)
//! - `tree_diff`: file-level comparison of flattened trees

pub mod diff_target;
pub mod hunk;
pub mod myers;
pub mod tree_diff;
