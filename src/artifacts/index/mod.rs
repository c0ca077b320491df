//! Index file format
//!
//! The index (staging area) records which blob and mode each tracked path
//! will have in the next commit. It is a text file with one record per
//! line, sorted by path:
//!
//! ```text
//! <octal-mode> <40-hex-oid> <path>
//! ```
//!
//! Paths are repository-relative and `/`-separated.

pub mod entry_mode;
pub mod index_entry;
