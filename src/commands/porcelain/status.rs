use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::status::status_info::{ChangeSet, Status, StatusInfo};
use colored::Colorize;

// Terminology:
// - staged changes: the index differs from the HEAD tree
// - unstaged changes: a tracked file differs between the index and the workspace
// - untracked files: files present in the workspace but absent from the index
impl Repository {
    pub fn status(&self, porcelain: bool) -> anyhow::Result<StatusInfo> {
        let index = self.load_index()?;
        let status_info = Status::new(self).initialize(&index)?;

        if porcelain {
            self.print_porcelain_status(&status_info)?;
        } else {
            self.print_long_status(&status_info)?;
        }

        Ok(status_info)
    }

    fn print_porcelain_status(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        for (file, change) in status_info.changed_files() {
            writeln!(self.writer(), "{} {}", change, file.display())?;
        }

        for file in status_info.untracked() {
            writeln!(self.writer(), "?? {}", file.display())?;
        }

        Ok(())
    }

    fn print_long_status(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        match self.refs().head()? {
            Head::Symbolic(branch) => writeln!(self.writer(), "On branch {branch}")?,
            Head::Detached(oid) => {
                writeln!(self.writer(), "{}", format!("HEAD detached at {}", oid.to_short_oid()).red())?
            }
        }
        if self.refs().read_head()?.is_none() {
            writeln!(self.writer(), "\nNo commits yet")?;
        }
        writeln!(self.writer())?;

        self.print_changeset("Changes to be committed:", status_info.staged())?;
        self.print_changeset("Changes not staged for commit:", status_info.unstaged())?;

        if !status_info.untracked().is_empty() {
            writeln!(self.writer(), "Untracked files:")?;
            for file in status_info.untracked() {
                writeln!(self.writer(), "\t{}", file.display().to_string().red())?;
            }
            writeln!(self.writer())?;
        }

        self.print_commit_hint(status_info)?;

        Ok(())
    }

    fn print_changeset(&self, title: &str, changeset: &ChangeSet) -> anyhow::Result<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "{title}")?;
        for (file, change) in changeset {
            writeln!(self.writer(), "{}{}", change, file.display())?;
        }
        writeln!(self.writer())?;

        Ok(())
    }

    fn print_commit_hint(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        if !status_info.staged().is_empty() {
            return Ok(());
        }

        if !status_info.unstaged().is_empty() {
            writeln!(self.writer(), "no changes added to commit")?;
        } else if !status_info.untracked().is_empty() {
            writeln!(
                self.writer(),
                "nothing added to commit but untracked files present"
            )?;
        } else {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        }

        Ok(())
    }
}
