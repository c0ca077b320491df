use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;

/// Where HEAD points: at a branch, or straight at a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Symbolic(BranchName),
    Detached(ObjectId),
}

impl Head {
    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            Head::Symbolic(branch) => Some(branch),
            Head::Detached(_) => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }

    /// Content of the HEAD file for this value
    pub fn to_file_content(&self) -> String {
        match self {
            Head::Symbolic(branch) => format!("ref: {}\n", branch.as_ref_path()),
            Head::Detached(oid) => format!("{oid}\n"),
        }
    }
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Symbolic(branch) => write!(f, "{branch}"),
            Head::Detached(oid) => write!(f, "HEAD detached at {}", oid.to_short_oid()),
        }
    }
}
