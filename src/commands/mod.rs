//! Command implementations
//!
//! Every command is an inherent method on [`Repository`](crate::areas::repository::Repository)
//! that prints its user-facing output through the repository writer. They
//! are split in two groups:
//!
//! - `plumbing`: low-level commands for direct object inspection (cat-file,
//!   hash-object, ls-tree, write-tree)
//! - `porcelain`: user-facing commands for version control workflows (add,
//!   commit, log, etc.)

pub mod plumbing;
pub mod porcelain;
