//! Plumbing commands (low-level operations)
//!
//! Plumbing commands give direct access to the object database. They are
//! primarily used for scripting and as building blocks for porcelain
//! commands.
//!
//! ## Commands
//!
//! - `cat-file`: Print an object's payload or type
//! - `hash-object`: Compute a blob ID and optionally store the blob
//! - `ls-tree`: List the contents of a tree object
//! - `write-tree`: Store the index as tree objects

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
