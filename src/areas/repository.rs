use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::BitError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository directory at the working-tree root
pub const REPOSITORY_DIR: &str = ".twig";

/// Handle owning every area of one repository
///
/// Commands are implemented as methods on this type and print their
/// user-facing output through `writer`.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    index_path: Box<Path>,
}

impl Repository {
    /// Open the repository whose working tree is rooted at `path`
    ///
    /// The repository directory does not have to exist yet, so this is also
    /// the entry point for `init`.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        let git_path = path.join(REPOSITORY_DIR);

        Ok(Repository {
            database: Database::new(git_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(git_path.clone().into_boxed_path()),
            index_path: git_path.join("index").into_boxed_path(),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        })
    }

    /// Find the repository containing `start` by walking up its ancestors
    ///
    /// Fails with `NotARepository` when no ancestor holds a repository
    /// directory.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", start.display()))?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(REPOSITORY_DIR).is_dir())
            .ok_or_else(|| BitError::NotARepository(start.clone()))?;
        tracing::debug!(root = %root.display(), "discovered repository");

        Self::new(root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Read the index from disk
    pub fn load_index(&self) -> anyhow::Result<Index> {
        let mut index = Index::new(self.index_path.clone());
        index.rehydrate()?;

        Ok(index)
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
