//! Flatten a tree graph into a `path -> (oid, mode)` mapping.

use crate::areas::database::Database;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::BitError;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Every file reachable from a tree, keyed by its full path
pub type FlatTree = BTreeMap<PathBuf, DatabaseEntry>;

/// Source of tree objects for the walker
pub trait TreeLoader {
    fn load_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree>;
}

impl TreeLoader for Database {
    fn load_tree(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        self.parse_object_as_tree(oid)
    }
}

pub struct TreeWalker<'l, L: TreeLoader> {
    loader: &'l L,
}

impl<'l, L: TreeLoader> TreeWalker<'l, L> {
    pub fn new(loader: &'l L) -> Self {
        TreeWalker { loader }
    }

    /// Expand `root` recursively; `CycleDetected` when a tree contains itself
    pub fn walk(&self, root: &ObjectId) -> anyhow::Result<FlatTree> {
        let mut files = FlatTree::new();
        let mut active = HashSet::new();

        self.walk_into(root, Path::new(""), &mut active, &mut files)?;

        Ok(files)
    }

    fn walk_into(
        &self,
        oid: &ObjectId,
        prefix: &Path,
        active: &mut HashSet<ObjectId>,
        files: &mut FlatTree,
    ) -> anyhow::Result<()> {
        if !active.insert(oid.clone()) {
            return Err(BitError::CycleDetected(oid.clone()).into());
        }

        for (name, entry) in self.loader.load_tree(oid)?.into_entries() {
            let path = prefix.join(name);

            if entry.is_tree() {
                self.walk_into(&entry.oid, &path, active, files)?;
            } else {
                files.insert(path, entry);
            }
        }

        active.remove(oid);

        Ok(())
    }
}
