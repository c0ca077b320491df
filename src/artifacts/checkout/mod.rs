//! Checkout planning and conflict handling
//!
//! Checkout computes the difference between the current and target trees,
//! refuses to run when local work would be lost, and otherwise rewrites the
//! working tree and the index to match the target.

pub mod conflict;
pub mod migration;
