//! Tree entries as stored in the object database
//!
//! A [`database_entry::DatabaseEntry`] pairs an object digest with the mode
//! it is recorded under. Trees, the index and checkout plans all compare
//! paths through this type.

pub mod database_entry;
