//! Checkout migration and conflict detection
//!
//! Switching to another commit happens in two phases:
//!
//! 1. Plan: diff the current HEAD tree against the target tree, check every
//!    affected path against the index and the working tree, and collect the
//!    file system actions to run.
//!    Every blob to be written is then read and verified, so a missing or
//!    corrupt object fails the checkout before anything changes.
//! 2. Apply: delete files, prune emptied directories, create directories,
//!    write files, then replace the index with the target tree.
//!
//! Every conflict is collected during planning and reported together, so
//! nothing is touched unless the whole migration is safe.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::WorkspaceEntry;
use crate::artifacts::checkout::conflict::{ConflictType, Conflicts};
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::diff::tree_diff::{TreeChangeType, TreeDiff};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_walker::FlatTree;
use crate::errors::BitError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Modify existing file
    Modify,
}

/// Set of planned actions grouped by type
pub type ActionsSet = BTreeMap<ActionType, Vec<(PathBuf, Option<DatabaseEntry>)>>;

/// Checkout migration planner and executor
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files of the commit HEAD currently resolves to
    head_tree: &'r FlatTree,
    /// Files of the commit being checked out
    target_tree: &'r FlatTree,
    /// Diff between the two trees
    tree_diff: TreeDiff,
    /// Planned file system actions
    actions: ActionsSet,
    /// Detected conflicts
    conflicts: Conflicts,
    /// Directories to create
    mkdirs: BTreeSet<PathBuf>,
    /// Directories that may become empty
    rmdirs: BTreeSet<PathBuf>,
    /// Verified content of every blob to be written
    blobs: BTreeMap<ObjectId, Bytes>,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        head_tree: &'r FlatTree,
        target_tree: &'r FlatTree,
    ) -> Self {
        Self {
            repository,
            head_tree,
            target_tree,
            tree_diff: TreeDiff::compare(head_tree, target_tree),
            actions: ActionsSet::new(),
            conflicts: Conflicts::default(),
            mkdirs: BTreeSet::new(),
            rmdirs: BTreeSet::new(),
            blobs: BTreeMap::new(),
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn mkdirs(&self) -> &BTreeSet<PathBuf> {
        &self.mkdirs
    }

    pub fn rmdirs(&self) -> &BTreeSet<PathBuf> {
        &self.rmdirs
    }

    pub fn conflicts(&self) -> &Conflicts {
        &self.conflicts
    }

    /// Plan, then update the working tree and the index
    ///
    /// Fails with `UncommittedChanges` before touching anything if any path
    /// conflicts.
    pub fn apply_changes(&mut self, index: &mut Index) -> anyhow::Result<()> {
        self.plan_changes(index)?;

        self.repository.workspace().apply_migration(self)?;

        index.replace(self.target_tree)?;
        index.write_updates()?;

        Ok(())
    }

    pub fn plan_changes(&mut self, index: &Index) -> anyhow::Result<()> {
        self.check_staged_changes(index);

        let changes = self
            .tree_diff
            .changes()
            .iter()
            .map(|(path, change)| (path.clone(), change.clone()))
            .collect::<Vec<_>>();

        for (path, change) in &changes {
            self.check_for_conflict(path, change, index)?;
            self.record_change(path, change);
        }

        if !self.conflicts.is_empty() {
            tracing::warn!(
                conflicts = self.conflicts.paths().len(),
                "checkout refused"
            );
            return Err(BitError::UncommittedChanges(self.conflicts.clone()).into());
        }

        self.load_target_blobs()
    }

    fn load_target_blobs(&mut self) -> anyhow::Result<()> {
        let oids = [ActionType::Add, ActionType::Modify]
            .iter()
            .filter_map(|action| self.actions.get(action))
            .flatten()
            .filter_map(|(_, entry)| entry.as_ref().map(|entry| entry.oid.clone()))
            .collect::<BTreeSet<_>>();

        for oid in oids {
            let blob = self.repository.database().parse_object_as_blob(&oid)?;
            self.blobs.insert(oid, blob.content().clone());
        }

        Ok(())
    }

    // Paths the trees agree on keep their HEAD version in the new index, so
    // anything staged there would be lost.
    fn check_staged_changes(&mut self, index: &Index) {
        let staged = index.to_flat_tree();

        let untouched = staged
            .keys()
            .chain(self.head_tree.keys())
            .filter(|path| !self.tree_diff.changes().contains_key(*path))
            .cloned()
            .collect::<BTreeSet<_>>();

        for path in untouched {
            if staged.get(&path) != self.head_tree.get(&path) {
                self.conflicts.add(ConflictType::StaleFile, path);
            }
        }
    }

    fn check_for_conflict(
        &mut self,
        path: &Path,
        change: &TreeChangeType,
        index: &Index,
    ) -> anyhow::Result<()> {
        let head = change.old_entry();
        let target = change.new_entry();
        let staged = index.entry_by_path(path).map(|entry| entry.to_database_entry());
        let staged = staged.as_ref();

        if staged != head && staged != target {
            self.conflicts.add(ConflictType::StaleFile, path.to_path_buf());
            return Ok(());
        }

        let working = self.repository.workspace().inspect(path)?;
        let conflicting = match &working {
            WorkspaceEntry::Missing => false,
            WorkspaceEntry::File(entry) => Some(entry) != head && Some(entry) != target,
            WorkspaceEntry::Directory => target.is_some() && self.holds_untracked_files(path)?,
        };

        if conflicting {
            let conflict_type = ConflictType::get_conflict_type(&working, staged, target);
            self.conflicts.add(conflict_type, path.to_path_buf());
        }

        if target.is_some() {
            self.check_parent_files(path, index)?;
        }

        Ok(())
    }

    /// Whether a directory in the way of a target file holds files that the
    /// checkout would not remove
    fn holds_untracked_files(&self, path: &Path) -> anyhow::Result<bool> {
        Ok(self
            .repository
            .workspace()
            .list_files(path)?
            .iter()
            .any(|file| !self.head_tree.contains_key(file)))
    }

    /// An untracked file sitting where the target needs a directory
    fn check_parent_files(&mut self, path: &Path, index: &Index) -> anyhow::Result<()> {
        for parent in path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }

            match self.repository.workspace().inspect(parent)? {
                WorkspaceEntry::Missing => continue,
                WorkspaceEntry::Directory => break,
                WorkspaceEntry::File(_) => {
                    if !self.head_tree.contains_key(parent) {
                        let conflict_type = if index.entry_by_path(parent).is_some() {
                            ConflictType::StaleFile
                        } else {
                            ConflictType::UntrackedOverwritten
                        };
                        self.conflicts.add(conflict_type, parent.to_path_buf());
                    }
                    break;
                }
            }
        }

        Ok(())
    }

    fn record_change(&mut self, path: &Path, change: &TreeChangeType) {
        let parents = path
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .map(Path::to_path_buf);

        let (action, entry) = match change {
            TreeChangeType::Added(new_entry) => {
                self.mkdirs.extend(parents);
                (ActionType::Add, Some(new_entry.clone()))
            }
            TreeChangeType::Deleted(_) => {
                self.rmdirs.extend(parents);
                (ActionType::Delete, None)
            }
            TreeChangeType::Modified { new, .. } => {
                self.mkdirs.extend(parents);
                (ActionType::Modify, Some(new.clone()))
            }
        };

        self.actions
            .entry(action)
            .or_default()
            .push((path.to_path_buf(), entry));
    }

    /// Content loaded while planning; `None` for blobs the plan never writes
    pub fn blob_data(&self, object_id: &ObjectId) -> Option<&Bytes> {
        self.blobs.get(object_id)
    }
}
