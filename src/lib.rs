//! twig: a local, single-user version control engine.
//!
//! The crate is split in three layers:
//!
//! - [`areas`]: the on-disk components of a repository (object database,
//!   index, refs, working directory) and the [`areas::repository::Repository`]
//!   handle that owns them.
//! - [`artifacts`]: the value types and algorithms (objects, trees, revisions,
//!   checkout planning, diffing, status) operating on those areas.
//! - [`commands`]: the porcelain and plumbing operations exposed by the `twig`
//!   binary, implemented on top of the two layers above.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
