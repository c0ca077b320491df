use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::errors::BitError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the object store, the refs hierarchy and a HEAD pointing at the
    /// unborn default branch
    ///
    /// The index file is only created by the first `add`; a missing index
    /// reads as empty.
    pub fn init(&self) -> anyhow::Result<()> {
        let git_path = self.git_path();
        if git_path.exists() {
            return Err(BitError::AlreadyInitialized(git_path).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        self.refs()
            .set_head(&Head::Symbolic(BranchName::default_branch()))
            .context("Failed to create initial HEAD reference")?;
        tracing::info!(path = %git_path.display(), "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            git_path.display()
        )?;

        Ok(())
    }
}
