//! Value types and algorithms behind the commands
//!
//! Nothing here prints; the `commands` layer decides what the user sees.
//!
//! - `branch`: branch names, HEAD states, revision expressions
//! - `checkout`: migration planning and the conflicts that abort it
//! - `core`: atomic file replacement
//! - `database`: tree entries as the object database records them
//! - `diff`: tree comparison, line edit scripts and hunks
//! - `index`: entry modes and staged entries
//! - `log`: commit creation and first-parent history
//! - `objects`: blobs, trees, commits and their identifiers
//! - `status`: the three-way HEAD/index/workspace comparison

pub mod branch;
pub mod checkout;
pub mod core;
pub mod database;
pub mod diff;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
