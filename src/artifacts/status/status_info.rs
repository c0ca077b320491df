use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::tree_walker::FlatTree;
use crate::artifacts::status::file_change::{
    FileChange, FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use crate::artifacts::status::inspector::Inspector;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type ChangeSet = BTreeMap<PathBuf, FileChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

/// Three-way comparison of HEAD, the index and the working tree
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    /// Untracked files, and wholly untracked directories with a trailing `/`
    pub(crate) untracked_files: FileSet,
    pub(crate) changed_files: BTreeMap<PathBuf, FileChange>,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) index_changeset: ChangeSet,
    pub(crate) head_tree: FlatTree,
}

impl StatusInfo {
    /// Staged changes, index vs HEAD
    pub fn staged(&self) -> &ChangeSet {
        &self.index_changeset
    }

    /// Unstaged changes, working tree vs index
    pub fn unstaged(&self) -> &ChangeSet {
        &self.workspace_changeset
    }

    pub fn untracked(&self) -> &FileSet {
        &self.untracked_files
    }

    /// Tracked paths with any change, keyed by path
    pub fn changed_files(&self) -> &BTreeMap<PathBuf, FileChange> {
        &self.changed_files
    }

    pub fn head_tree(&self) -> &FlatTree {
        &self.head_tree
    }

    pub fn is_clean(&self) -> bool {
        self.index_changeset.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }
}

pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        Status { repository }
    }

    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let inspector = Inspector::new(self.repository);
        let mut untracked_files = FileSet::new();

        self.scan_workspace(Path::new(""), &mut untracked_files, index, &inspector)?;
        let head_tree = self.load_head_tree()?;

        let mut changed_files = BTreeMap::<PathBuf, FileChange>::new();
        for entry in index.entries() {
            let working = self.repository.workspace().inspect(&entry.name)?;
            let workspace_change = inspector.check_index_against_workspace(entry, &working);
            let index_change =
                inspector.check_index_against_head_tree(Some(entry), head_tree.get(&entry.name));

            if workspace_change != WorkspaceChangeType::None
                || index_change != IndexChangeType::None
            {
                changed_files.insert(
                    entry.name.clone(),
                    FileChange {
                        workspace_change,
                        index_change,
                    },
                );
            }
        }

        for path in head_tree.keys() {
            if index.entry_by_path(path).is_none() {
                changed_files.entry(path.clone()).or_default().index_change =
                    IndexChangeType::Deleted;
            }
        }

        let workspace_changeset = changed_files
            .iter()
            .filter(|(_, change)| change.workspace_change != WorkspaceChangeType::None)
            .map(|(file, change)| (file.clone(), FileChangeType::Workspace(change.workspace_change)))
            .collect::<ChangeSet>();
        let index_changeset = changed_files
            .iter()
            .filter(|(_, change)| change.index_change != IndexChangeType::None)
            .map(|(file, change)| (file.clone(), FileChangeType::Index(change.index_change)))
            .collect::<ChangeSet>();

        Ok(StatusInfo {
            untracked_files,
            changed_files,
            workspace_changeset,
            index_changeset,
            head_tree,
        })
    }

    fn scan_workspace(
        &self,
        prefix_path: &Path,
        untracked_files: &mut FileSet,
        index: &Index,
        inspector: &Inspector<'_>,
    ) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        for path in workspace.list_dir(prefix_path)? {
            let is_dir = workspace.path().join(&path).is_dir();

            if is_dir && index.tracks_directory(&path) {
                self.scan_workspace(&path, untracked_files, index, inspector)?;
            } else if inspector.is_untracked(&path, index) {
                let path = if is_dir {
                    // add the file separator to mark a directory
                    path.join("")
                } else {
                    path
                };
                untracked_files.insert(path);
            }
        }

        Ok(())
    }

    fn load_head_tree(&self) -> anyhow::Result<FlatTree> {
        let head_oid = self.repository.refs().read_head()?;

        self.repository.database().load_commit_tree(head_oid.as_ref())
    }
}
