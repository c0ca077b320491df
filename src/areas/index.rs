//! Index (staging area)
//!
//! The index tracks which blob and mode every path will have in the next
//! commit. It is a flat mapping kept sorted by path, persisted as a text file
//! (see [`crate::artifacts::index`]) that is always rewritten in full through
//! a temp file and a rename.
//!
//! Records are `<mode> <oid> <path>`: the path comes last so it may contain
//! spaces.
//!
//! ## Data Structures
//!
//! - `entries`: Maps file paths to their index entries
//! - `children`: Maps directory paths to the tracked files below them

use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::index_entry::{IndexEntry, validate_path};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_walker::FlatTree;
use crate::errors::BitError;
use anyhow::{Context, anyhow};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Index (staging area)
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    /// Tracked files mapped by path
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Directory hierarchy for efficient parent-child lookups
    children: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// Whether the index was modified since it was loaded
    changed: bool,
}

impl Index {
    /// Create a new empty index backed by `path`
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.changed
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// A missing or empty file yields an empty index. Any malformed record
    /// fails with `IndexCorrupt`; the file itself is never touched here.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        let content = match std::fs::read(self.path()) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(error) => {
                return Err(error)
                    .context(format!("Unable to read index {}", self.path().display()));
            }
        };

        let content = String::from_utf8(content).map_err(|error| BitError::IndexCorrupt {
            line: 0,
            reason: format!("not valid UTF-8 ({error})"),
        })?;

        for (line_number, record) in content.lines().enumerate() {
            let line = line_number + 1;
            let corrupt = |reason: String| BitError::IndexCorrupt { line, reason };

            let entry = IndexEntry::parse_record(record).map_err(corrupt)?;
            if self.entries.contains_key(&entry.name) {
                return Err(corrupt(format!("duplicate path '{}'", entry.name.display())).into());
            }
            if self.is_directly_tracked(&entry.name)
                || entry
                    .parent_dirs()
                    .into_iter()
                    .any(|parent| self.entries.contains_key(parent))
            {
                return Err(corrupt(format!(
                    "path '{}' is both a file and a directory",
                    entry.name.display()
                ))
                .into());
            }

            self.store_entry(entry);
        }

        tracing::debug!(path = %self.path().display(), entries = self.len(), "loaded index");

        Ok(())
    }

    /// Whether `path` is a tracked file or a directory holding tracked files
    pub fn is_directly_tracked(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.children.contains_key(path)
    }

    /// Whether `path` is a directory holding tracked files
    pub fn tracks_directory(&self, path: &Path) -> bool {
        self.children.contains_key(path)
    }

    /// Remove entries that would clash with `entry`: files at any of its
    /// ancestor paths and everything below its own path
    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        let parents = entry
            .parent_dirs()
            .into_iter()
            .map(Path::to_path_buf)
            .collect::<Vec<_>>();

        for parent in parents {
            self.remove_entry(&parent);
        }
        self.remove_children(&entry.name);
    }

    fn store_entry(&mut self, entry: IndexEntry) {
        for parent in entry.parent_dirs() {
            self.children
                .entry(parent.to_path_buf())
                .or_default()
                .insert(entry.name.clone());
        }

        self.entries.insert(entry.name.clone(), entry);
    }

    fn remove_children(&mut self, path: &Path) {
        if let Some(children) = self.children.remove(path) {
            for child in children {
                self.remove_entry(&child);
            }
        }
    }

    fn remove_entry(&mut self, path: &Path) {
        if let Some(entry) = self.entries.remove(path) {
            for parent in entry.parent_dirs() {
                if let Some(children) = self.children.get_mut(parent) {
                    children.remove(path);
                    if children.is_empty() {
                        self.children.remove(parent);
                    }
                }
            }
        }
    }

    /// Stage `path` with the given blob and mode
    ///
    /// Evicts a file entry sitting at any ancestor of `path` and every entry
    /// below `path/`.
    pub fn add(&mut self, path: PathBuf, oid: ObjectId, mode: FileMode) -> anyhow::Result<()> {
        validate_path(&path).map_err(|reason| anyhow!("Cannot stage path: {reason}"))?;

        let entry = IndexEntry::new(path, oid, mode);
        if self.entries.get(&entry.name) == Some(&entry) {
            return Ok(());
        }

        self.discard_conflicts(&entry);
        tracing::debug!(path = %entry.name.display(), oid = %entry.oid, "staged");
        self.store_entry(entry);
        self.changed = true;

        Ok(())
    }

    /// Drop `path` and everything below it
    pub fn remove(&mut self, path: &Path) {
        if !self.is_directly_tracked(path) {
            return;
        }

        self.remove_entry(path);
        self.remove_children(path);
        tracing::debug!(path = %path.display(), "unstaged");
        self.changed = true;
    }

    /// Clear the index and repopulate it from a flattened tree
    pub fn replace(&mut self, files: &FlatTree) -> anyhow::Result<()> {
        self.entries.clear();
        self.children.clear();

        for (path, entry) in files {
            let mode = FileMode::try_from(entry.mode)?;
            self.store_entry(IndexEntry::new(path.clone(), entry.oid.clone(), mode));
        }
        self.changed = true;

        Ok(())
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut content = String::new();
        for entry in self.entries() {
            content.push_str(&entry.to_record()?);
            content.push('\n');
        }

        write_atomically(self.path(), content.as_bytes())
            .context(format!("Unable to write index {}", self.path().display()))?;
        tracing::debug!(path = %self.path().display(), entries = self.len(), "wrote index");
        self.changed = false;

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn into_entries(self) -> impl Iterator<Item = IndexEntry> {
        self.entries.into_values()
    }

    /// Tracked files as a flat `path -> (oid, mode)` mapping
    pub fn to_flat_tree(&self) -> FlatTree {
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), entry.to_database_entry()))
            .collect()
    }

    /// Tracked files equal to or below `path`
    pub fn entries_under_path(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .keys()
            .filter(|entry_path| path.as_os_str().is_empty() || entry_path.starts_with(path))
            .cloned()
            .collect()
    }
}
