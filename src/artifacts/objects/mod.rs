//! Object types and operations
//!
//! All content is stored as objects identified by SHA-1 hashes. There are
//! three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//!
//! Objects serialize to their payload only; the database frames them as
//! `<type> <size>\0<payload>` before hashing and compressing.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;
pub mod tree_walker;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest accepted abbreviation of an object ID
pub const MIN_ABBREVIATED_LENGTH: usize = 4;
