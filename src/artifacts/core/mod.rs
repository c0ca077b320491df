//! Core utilities shared by every on-disk area.

pub mod atomic_file;
