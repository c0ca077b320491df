//! Working directory access
//!
//! Every path handed to or returned from the workspace is relative to the
//! working-tree root. The repository directory itself is never listed.

use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::core::atomic_file::write_atomically_with_mode;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::BitError;
use anyhow::Context;
use bytes::Bytes;
use is_executable::IsExecutable;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// What currently occupies a path in the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEntry {
    Missing,
    /// A file with the digest its content would have as a blob
    File(DatabaseEntry),
    Directory,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ignored(path: &Path) -> bool {
        path.components()
            .next()
            .is_some_and(|component| component.as_os_str() == REPOSITORY_DIR)
    }

    /// Turn a user-supplied path (absolute, or relative to the root) into a
    /// normalized path relative to the working-tree root
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };
        let absolute = std::fs::canonicalize(&absolute).unwrap_or_else(|_| normalize(&absolute));

        let relative = absolute
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| anyhow::anyhow!("'{}' is outside repository", path.display()))?;

        if Self::is_ignored(&relative) {
            anyhow::bail!("'{}' is inside the repository directory", path.display());
        }

        Ok(relative)
    }

    /// Immediate children of a directory, sorted, skipping the repository
    /// directory
    pub fn list_dir(&self, dir_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let absolute = self.path.join(dir_path);

        let mut children = std::fs::read_dir(&absolute)
            .context(format!("Unable to list directory {}", absolute.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| dir_path.join(entry.file_name()))
            .filter(|path| !Self::is_ignored(path))
            .collect::<Vec<_>>();
        children.sort();

        Ok(children)
    }

    /// Every file at or below `path`, sorted
    ///
    /// Fails with `PathNotFound` when nothing exists at `path`.
    pub fn list_files(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let absolute = self.path.join(path);

        if !absolute.exists() {
            return Err(BitError::PathNotFound(path.to_path_buf()).into());
        }

        if absolute.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&absolute)
            .into_iter()
            .filter_entry(|entry| !self.is_repository_dir(entry.path()));

        for entry in walker {
            let entry = entry.context(format!("Unable to walk {}", absolute.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.path().strip_prefix(&self.path)?.to_path_buf());
            }
        }
        files.sort();

        Ok(files)
    }

    fn is_repository_dir(&self, absolute: &Path) -> bool {
        absolute
            .strip_prefix(&self.path)
            .is_ok_and(|relative| Self::is_ignored(relative))
    }

    /// Whether any file exists at or below `path`
    pub fn contains_files(&self, path: &Path) -> bool {
        WalkDir::new(self.path.join(path))
            .into_iter()
            .filter_entry(|entry| !self.is_repository_dir(entry.path()))
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_type().is_file())
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let absolute = self.path.join(file_path);

        std::fs::read(&absolute)
            .map(Bytes::from)
            .context(format!("Unable to read file {}", file_path.display()))
    }

    pub fn file_mode(&self, file_path: &Path) -> FileMode {
        if self.path.join(file_path).is_executable() {
            FileMode::Executable
        } else {
            FileMode::Regular
        }
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Probe what sits at `path`; files are hashed so they can be compared
    /// against index and tree entries
    pub fn inspect(&self, path: &Path) -> anyhow::Result<WorkspaceEntry> {
        let absolute = self.path.join(path);

        match std::fs::metadata(&absolute) {
            Ok(metadata) if metadata.is_dir() => Ok(WorkspaceEntry::Directory),
            Ok(_) => {
                let oid = self.parse_blob(path)?.object_id()?;
                let mode = EntryMode::File(self.file_mode(path));

                Ok(WorkspaceEntry::File(DatabaseEntry::new(oid, mode)))
            }
            Err(error)
                if matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) =>
            {
                Ok(WorkspaceEntry::Missing)
            }
            Err(error) => {
                Err(error).context(format!("Unable to inspect {}", absolute.display()))
            }
        }
    }

    // The order of applying migrations is important:
    // deletions first, then emptied directories deepest first, then new
    // directories parents first, then file contents.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        self.apply_migration_action_set(migration, ActionType::Delete)?;

        for dir_path in migration.rmdirs().iter().rev() {
            self.remove_directory_if_empty(dir_path)?;
        }

        for dir_path in migration.mkdirs() {
            self.make_directory(dir_path)?;
        }

        self.apply_migration_action_set(migration, ActionType::Modify)?;
        self.apply_migration_action_set(migration, ActionType::Add)?;

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        let Some(changes) = migration.actions().get(&action) else {
            return Ok(());
        };

        for (file_path, entry) in changes {
            let absolute = self.path.join(file_path);

            match (action, entry) {
                (ActionType::Delete, _) => {
                    if absolute.is_file() {
                        std::fs::remove_file(&absolute)
                            .context(format!("Failed to remove file {}", file_path.display()))?;
                    }
                }
                (ActionType::Add | ActionType::Modify, Some(entry)) => {
                    if absolute.is_dir() {
                        std::fs::remove_dir_all(&absolute).context(format!(
                            "Failed to remove directory {}",
                            file_path.display()
                        ))?;
                    }

                    let data = migration.blob_data(&entry.oid).ok_or_else(|| {
                        anyhow::anyhow!("blob {} was not loaded for checkout", entry.oid)
                    })?;
                    let executable = matches!(entry.mode, EntryMode::File(FileMode::Executable));

                    write_atomically_with_mode(&absolute, data, executable)
                        .context(format!("Failed to write file {}", file_path.display()))?;
                }
                (ActionType::Add | ActionType::Modify, None) => {
                    anyhow::bail!("No entry to write for {}", file_path.display());
                }
            }
        }

        Ok(())
    }

    fn remove_directory_if_empty(&self, dir_path: &Path) -> anyhow::Result<()> {
        let absolute = self.path.join(dir_path);

        match std::fs::remove_dir(&absolute) {
            Ok(()) => Ok(()),
            Err(error)
                if matches!(
                    error.kind(),
                    ErrorKind::NotFound | ErrorKind::DirectoryNotEmpty | ErrorKind::NotADirectory
                ) =>
            {
                Ok(())
            }
            Err(error) => {
                Err(error).context(format!("Failed to remove directory {}", dir_path.display()))
            }
        }
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        let absolute = self.path.join(dir_path);

        if absolute.is_file() {
            std::fs::remove_file(&absolute)
                .context(format!("Failed to remove file {}", dir_path.display()))?;
        }

        std::fs::create_dir_all(&absolute)
            .context(format!("Failed to create directory {}", dir_path.display()))
    }
}

/// Resolve `.` and `..` lexically, for paths that do not exist (yet)
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
