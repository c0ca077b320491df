use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::BitError;
use anyhow::Context;

/// Default branch HEAD points at in a fresh repository
pub const DEFAULT_BRANCH: &str = "master";

/// A validated branch name, stored under `refs/heads/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Validate a branch name against the ref-name rules
    ///
    /// Fails with `InvalidBranchName`.
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || name == "HEAD" || re.is_match(&name) {
            return Err(BitError::InvalidBranchName(name).into());
        }

        Ok(Self(name))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// Path of the branch file relative to the repository directory
    pub fn as_ref_path(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
