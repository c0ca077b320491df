//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files
//! (blobs) and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are sorted by name, where directory names compare as if they
//! ended with `/`.
//!
//! ## Tree Building
//!
//! [`TreeBuilder`] groups flat index entries by directory and stores the
//! nested trees bottom-up, children before parents.

use crate::areas::database::Database;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::BitError;
use anyhow::{Context, anyhow};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Tree object representing one directory level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, DatabaseEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in serialization order
    fn sorted_entries(&self) -> Vec<(&String, &DatabaseEntry)> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by_cached_key(|(name, entry)| sort_key(name, entry));

        entries
    }
}

fn sort_key(name: &str, entry: &DatabaseEntry) -> Vec<u8> {
    let mut key = name.as_bytes().to_vec();
    if entry.is_tree() {
        key.push(b'/');
    }

    key
}

fn validate_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(anyhow!("Invalid tree entry name '{}'", name.escape_debug()));
    }

    Ok(())
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut tree_bytes = Vec::new();

        for (name, entry) in self.sorted_entries() {
            write!(tree_bytes, "{} {}", entry.mode.as_str(), name)?;
            tree_bytes.push(0);
            entry.oid.write_h40_to(&mut tree_bytes)?;
        }

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break;
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(anyhow!("unexpected EOF in mode"));
            }
            let mode = EntryMode::from_octal_str(std::str::from_utf8(&mode_bytes)?)?;

            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(anyhow!("unexpected EOF in name"));
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();
            validate_name(&name)?;

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            if entries.insert(name, DatabaseEntry::new(oid, mode)).is_some() {
                return Err(anyhow!("duplicate tree entry"));
            }
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.sorted_entries()
            .into_iter()
            .map(|(name, entry)| format!("{}\t{}", entry.listing(), name))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Pending node of a tree under construction
#[derive(Debug, Clone)]
enum PendingEntry {
    File(DatabaseEntry),
    Directory(TreeBuilder),
}

/// Builds the nested tree objects described by a flat set of index entries
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    entries: BTreeMap<String, PendingEntry>,
}

impl TreeBuilder {
    /// Group index entries by directory
    ///
    /// The result only depends on the set of entries, not on their order.
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> anyhow::Result<Self> {
        let mut root = Self::default();

        for entry in entries {
            let components = entry
                .name
                .iter()
                .map(|component| {
                    component
                        .to_str()
                        .context(format!("Invalid path {}", entry.name.display()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            root.add_entry(&components, entry.to_database_entry())?;
        }

        Ok(root)
    }

    fn add_entry(&mut self, components: &[&str], entry: DatabaseEntry) -> anyhow::Result<()> {
        match components {
            [] => Err(anyhow!("Cannot add an entry with an empty path")),
            [name] => {
                validate_name(name)?;
                if let Some(PendingEntry::Directory(_)) = self.entries.get(*name) {
                    return Err(anyhow!("'{name}' is both a file and a directory"));
                }
                self.entries
                    .insert(name.to_string(), PendingEntry::File(entry));

                Ok(())
            }
            [parent, rest @ ..] => {
                validate_name(parent)?;
                let pending = self
                    .entries
                    .entry(parent.to_string())
                    .or_insert_with(|| PendingEntry::Directory(TreeBuilder::default()));

                match pending {
                    PendingEntry::Directory(tree) => tree.add_entry(rest, entry),
                    PendingEntry::File(_) => {
                        Err(anyhow!("'{parent}' is both a file and a directory"))
                    }
                }
            }
        }
    }

    /// Store every nested tree, children before parents, and return the
    /// root digest
    ///
    /// Fails with `ObjectNotFound` when a referenced blob is missing from the
    /// database.
    pub fn write(&self, database: &Database) -> anyhow::Result<ObjectId> {
        let mut entries = BTreeMap::new();

        for (name, pending) in &self.entries {
            let entry = match pending {
                PendingEntry::File(entry) => {
                    if !database.exists(&entry.oid) {
                        return Err(BitError::ObjectNotFound(entry.oid.clone()).into());
                    }
                    entry.clone()
                }
                PendingEntry::Directory(tree) => {
                    DatabaseEntry::new(tree.write(database)?, EntryMode::Directory)
                }
            };
            entries.insert(name.clone(), entry);
        }

        database.store(&Tree::new(entries))
    }
}
