use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::WorkspaceEntry;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use std::path::Path;

/// Pairwise comparisons between the working tree, the index and HEAD
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        Inspector { repository }
    }

    /// Whether a path should be reported as untracked: files absent from
    /// the index, and directories that hold files but no tracked ones
    pub fn is_untracked(&self, path: &Path, index: &Index) -> bool {
        let workspace = self.repository.workspace();

        if workspace.path().join(path).is_dir() {
            !index.tracks_directory(path) && workspace.contains_files(path)
        } else {
            index.entry_by_path(path).is_none()
        }
    }

    pub fn check_index_against_workspace(
        &self,
        entry: &IndexEntry,
        working: &WorkspaceEntry,
    ) -> WorkspaceChangeType {
        match working {
            WorkspaceEntry::Missing | WorkspaceEntry::Directory => WorkspaceChangeType::Deleted,
            WorkspaceEntry::File(file) if entry.to_database_entry() != *file => {
                WorkspaceChangeType::Modified
            }
            WorkspaceEntry::File(_) => WorkspaceChangeType::None,
        }
    }

    pub fn check_index_against_head_tree(
        &self,
        index_entry: Option<&IndexEntry>,
        head_entry: Option<&DatabaseEntry>,
    ) -> IndexChangeType {
        match (index_entry, head_entry) {
            (Some(index_entry), Some(head_entry))
                if index_entry.to_database_entry() != *head_entry =>
            {
                IndexChangeType::Modified
            }
            (Some(_), None) => IndexChangeType::Added,
            (None, Some(_)) => IndexChangeType::Deleted,
            _ => IndexChangeType::None,
        }
    }
}
