//! Typed failure kinds
//!
//! Every fallible operation in the crate returns `anyhow::Result`. When a
//! failure is one the caller may want to react to, it is raised as a
//! [`BitError`] so it can be recovered with `err.downcast_ref::<BitError>()`.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::Conflicts;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BitError {
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("object {oid} is corrupt: {reason}")]
    ObjectCorrupt { oid: ObjectId, reason: String },

    #[error("index file is corrupt at line {line}: {reason}")]
    IndexCorrupt { line: usize, reason: String },

    #[error("unknown revision or reference '{0}'")]
    RefNotFound(String),

    #[error("your current branch '{0}' does not have any commits yet")]
    UnbornBranch(BranchName),

    #[error("a branch named '{0}' already exists")]
    BranchExists(BranchName),

    #[error("not a valid object name: there are no commits yet")]
    NoCommitsYet,

    #[error("nothing to commit, working tree clean")]
    NothingToCommit,

    #[error("{0}")]
    UncommittedChanges(Conflicts),

    #[error("tree {0} is reachable from itself")]
    CycleDetected(ObjectId),

    #[error("'{0}' is not a valid branch name")]
    InvalidBranchName(String),

    #[error("cannot delete branch '{0}' checked out")]
    BranchCheckedOut(BranchName),

    #[error("object {oid} is a {actual}, not a {expected}")]
    UnexpectedObjectType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("short object ID {prefix} is ambiguous, candidates are: {}", join_oids(.candidates))]
    AmbiguousObjectId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("pathspec '{}' did not match any files", .0.display())]
    PathNotFound(PathBuf),

    #[error("not a twig repository (or any of the parent directories): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("repository already exists in {}", .0.display())]
    AlreadyInitialized(PathBuf),
}

fn join_oids(candidates: &[ObjectId]) -> String {
    candidates
        .iter()
        .map(|oid| oid.to_short_oid())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recover the typed kind from a propagated error, if any.
pub fn error_kind(error: &anyhow::Error) -> Option<&BitError> {
    error.downcast_ref::<BitError>()
}
