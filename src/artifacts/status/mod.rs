//! Working tree status inspection
//!
//! Compares the working directory against the index, and the index against
//! the HEAD commit.
//!
//! - `file_change`: Enum types for categorizing changes
//! - `inspector`: Pairwise comparisons of single paths
//! - `status_info`: Status information aggregation

pub mod file_change;
pub mod inspector;
pub mod status_info;
