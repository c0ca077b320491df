//! Branches and HEAD
//!
//! References are human-readable names pointing to commits:
//! - Branches: `refs/heads/<name>`, each holding `<oid>\n`
//! - HEAD: either `ref: refs/heads/<name>\n` (symbolic) or `<oid>\n`
//!   (detached)
//!
//! A symbolic HEAD may name a branch whose file does not exist yet. Such a
//! branch is *unborn*; the first commit on it creates the file.

use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitError;
use anyhow::Context;
use std::collections::{BTreeSet, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing a symbolic HEAD
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Reference manager rooted at the repository directory
#[derive(Debug)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    /// Read where HEAD points
    pub fn head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        let symref_regex = regex::Regex::new(SYMREF_REGEX)
            .with_context(|| format!("invalid symref regex: {SYMREF_REGEX}"))?;

        if let Some(captures) = symref_regex.captures(content) {
            let branch = BranchName::try_parse(captures[1].to_string())
                .with_context(|| format!("HEAD names an invalid branch: {content}"))?;
            Ok(Head::Symbolic(branch))
        } else {
            let oid = ObjectId::try_parse(content.to_string())
                .with_context(|| format!("HEAD holds neither a ref nor an object id: {content}"))?;
            Ok(Head::Detached(oid))
        }
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        write_atomically(&self.head_path(), head.to_file_content().as_bytes())?;
        tracing::debug!(%head, "updated HEAD");

        Ok(())
    }

    /// The commit HEAD resolves to, or `None` on an unborn branch
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.head()? {
            Head::Symbolic(branch) => self.read_branch(&branch),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// The commit HEAD resolves to
    ///
    /// Fails with `UnbornBranch` when HEAD names a branch with no commits.
    pub fn resolve_head(&self) -> anyhow::Result<ObjectId> {
        match self.head()? {
            Head::Symbolic(branch) => match self.read_branch(&branch)? {
                Some(oid) => Ok(oid),
                None => Err(BitError::UnbornBranch(branch).into()),
            },
            Head::Detached(oid) => Ok(oid),
        }
    }

    /// Advance whatever HEAD points at to `oid`
    ///
    /// A symbolic HEAD moves its branch, creating the branch file when the
    /// branch is unborn. A detached HEAD is rewritten in place.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.head()? {
            Head::Symbolic(branch) => self.write_branch(&branch, oid),
            Head::Detached(_) => self.set_head(&Head::Detached(oid.clone())),
        }
    }

    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        let content = match std::fs::read_to_string(&branch_path) {
            Ok(content) => content,
            Err(error) if matches!(error.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                return Ok(None);
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read branch file at {}", branch_path.display())
                });
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .with_context(|| format!("branch {name} holds an invalid object id"))
            .map(Some)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Fails with `BranchExists` if the branch is already present
    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(BitError::BranchExists(name.clone()).into());
        }

        self.write_branch(name, oid)?;
        tracing::info!(branch = %name, %oid, "created branch");

        Ok(())
    }

    /// Fails with `RefNotFound` if the branch does not exist
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if !self.branch_exists(name) {
            return Err(BitError::RefNotFound(name.to_string()).into());
        }

        self.write_branch(name, oid)
    }

    /// Remove a branch and return the commit it pointed at
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if let Head::Symbolic(current) = self.head()?
            && &current == name
        {
            return Err(BitError::BranchCheckedOut(name.clone()).into());
        }

        let oid = self
            .read_branch(name)?
            .ok_or_else(|| BitError::RefNotFound(name.to_string()))?;

        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {}", branch_path.display()))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::info!(branch = %name, %oid, "deleted branch");

        Ok(oid)
    }

    /// All branches, sorted; files with invalid names (e.g. stray temp
    /// files) are skipped
    pub fn list_branches(&self) -> anyhow::Result<BTreeSet<BranchName>> {
        let heads_path = self.heads_path();
        if !heads_path.is_dir() {
            return Ok(BTreeSet::new());
        }

        Ok(WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path.to_str()?.replace(std::path::MAIN_SEPARATOR, "/");
                BranchName::try_parse(name).ok()
            })
            .collect())
    }

    /// Map each commit to the branches pointing at it
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<ObjectId, Vec<BranchName>>> {
        let mut reverse_refs: HashMap<ObjectId, Vec<BranchName>> = HashMap::new();

        for branch in self.list_branches()? {
            if let Some(oid) = self.read_branch(&branch)? {
                reverse_refs.entry(oid).or_default().push(branch);
            }
        }

        Ok(reverse_refs)
    }

    fn write_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        write_atomically(&self.branch_path(name), format!("{oid}\n").as_bytes())
            .with_context(|| format!("failed to write branch {name}"))?;
        tracing::debug!(branch = %name, %oid, "updated branch");

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {}", parent.display())
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.path.join(name.as_ref_path())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }
}
