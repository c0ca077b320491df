use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::errors::{BitError, error_kind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage every file at or below each of `paths`
    ///
    /// Tracked files that no longer exist on disk are unstaged. A path that
    /// matches neither a file on disk nor a tracked entry fails with
    /// `PathNotFound` before anything is staged.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let mut index = self.load_index()?;

        let mut to_stage = BTreeSet::new();
        let mut to_unstage = BTreeSet::new();

        for path in paths {
            let relative = self.workspace().relative_path(path)?;
            let tracked = index.entries_under_path(&relative);

            let files = match self.workspace().list_files(&relative) {
                Ok(files) => files,
                Err(error)
                    if !tracked.is_empty()
                        && matches!(error_kind(&error), Some(BitError::PathNotFound(_))) =>
                {
                    Vec::new()
                }
                Err(error) => return Err(error),
            };

            to_unstage.extend(tracked.into_iter().filter(|file| !files.contains(file)));
            to_stage.extend(files);
        }

        for path in &to_unstage {
            index.remove(path);
        }
        for path in &to_stage {
            self.stage_file(&mut index, path)?;
        }

        index.write_updates()?;

        Ok(())
    }

    fn stage_file(&self, index: &mut Index, path: &Path) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(path)?;
        let mode = self.workspace().file_mode(path);

        let oid = self.database().store(&blob)?;
        index.add(path.to_path_buf(), oid, mode)
    }
}
