use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::hunk::{DEFAULT_CONTEXT, Hunk};
use crate::artifacts::diff::myers::{Edit, MyersDiff};
use crate::artifacts::diff::tree_diff::TreeDiff;
use crate::artifacts::objects::tree_walker::FlatTree;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::status_info::Status;
use colored::Colorize;
use std::path::Path;

impl Repository {
    /// Print a unified diff
    ///
    /// - no arguments: index against the working tree
    /// - `cached`: HEAD against the index
    /// - two revisions: the first commit's tree against the second's
    pub fn diff(&self, cached: bool, revisions: Option<(&str, &str)>) -> anyhow::Result<()> {
        match revisions {
            Some((old, new)) => self.diff_commits(old, new),
            None => {
                let index = self.load_index()?;

                if cached {
                    self.diff_head_index(&index)
                } else {
                    self.diff_index_workspace(&index)
                }
            }
        }
    }

    fn diff_index_workspace(&self, index: &Index) -> anyhow::Result<()> {
        let status_info = Status::new(self).initialize(index)?;

        for (file, change) in status_info.changed_files() {
            let Some(entry) = index.entry_by_path(file) else {
                continue;
            };
            let mut a = DiffTarget::from_entry(file, &entry.to_database_entry(), self.database())?;

            match change.workspace_change {
                WorkspaceChangeType::Modified => {
                    self.print_diff(&mut a, &mut DiffTarget::from_file(file, self.workspace())?)?
                }
                WorkspaceChangeType::Deleted => {
                    self.print_diff(&mut a, &mut DiffTarget::from_nothing(file)?)?
                }
                WorkspaceChangeType::None => {}
            }
        }

        Ok(())
    }

    fn diff_head_index(&self, index: &Index) -> anyhow::Result<()> {
        let head_oid = self.refs().read_head()?;
        let head_tree = self.database().load_commit_tree(head_oid.as_ref())?;

        self.print_tree_diff(&head_tree, &index.to_flat_tree())
    }

    fn diff_commits(&self, old: &str, new: &str) -> anyhow::Result<()> {
        let old_oid = Revision::try_parse(old)?.resolve(self)?;
        let new_oid = Revision::try_parse(new)?.resolve(self)?;

        let old_tree = self.database().load_commit_tree(Some(&old_oid))?;
        let new_tree = self.database().load_commit_tree(Some(&new_oid))?;

        self.print_tree_diff(&old_tree, &new_tree)
    }

    fn print_tree_diff(&self, old_tree: &FlatTree, new_tree: &FlatTree) -> anyhow::Result<()> {
        let tree_diff = TreeDiff::compare(old_tree, new_tree);

        for (file, change) in tree_diff.changes() {
            let mut a = match change.old_entry() {
                Some(entry) => DiffTarget::from_entry(file, entry, self.database())?,
                None => DiffTarget::from_nothing(file)?,
            };
            let mut b = match change.new_entry() {
                Some(entry) => DiffTarget::from_entry(file, entry, self.database())?,
                None => DiffTarget::from_nothing(file)?,
            };

            self.print_diff(&mut a, &mut b)?;
        }

        Ok(())
    }

    fn print_diff(&self, a: &mut DiffTarget, b: &mut DiffTarget) -> anyhow::Result<()> {
        if a.oid == b.oid && a.mode == b.mode {
            return Ok(());
        }

        a.file = Path::new("a").join(&a.file);
        b.file = Path::new("b").join(&b.file);

        writeln!(
            self.writer(),
            "{}",
            format!("diff --git {} {}", a.file.display(), b.file.display()).bold()
        )?;
        self.print_diff_mode(a, b)?;
        self.print_diff_content(a, b)?;

        Ok(())
    }

    fn print_diff_mode(&self, a: &DiffTarget, b: &DiffTarget) -> anyhow::Result<()> {
        if a.mode.is_none() {
            writeln!(
                self.writer(),
                "{}",
                format!("new file mode {}", b.pretty_mode()).bold()
            )?;
        } else if b.mode.is_none() {
            writeln!(
                self.writer(),
                "{}",
                format!("deleted file mode {}", a.pretty_mode()).bold()
            )?;
        } else if a.mode != b.mode {
            writeln!(
                self.writer(),
                "{}",
                format!("old mode {}", a.pretty_mode()).bold()
            )?;
            writeln!(
                self.writer(),
                "{}",
                format!("new mode {}", b.pretty_mode()).bold()
            )?;
        }

        Ok(())
    }

    fn print_diff_content(&self, a: &DiffTarget, b: &DiffTarget) -> anyhow::Result<()> {
        if a.oid == b.oid {
            return Ok(());
        }

        let mut oid_range = format!("index {}..{}", a.oid.to_short_oid(), b.oid.to_short_oid());
        if a.mode == b.mode {
            oid_range.push_str(format!(" {}", a.pretty_mode()).as_str());
        }

        writeln!(self.writer(), "{}", oid_range.bold())?;
        writeln!(
            self.writer(),
            "{}",
            format!("--- {}", a.diff_path().display()).bold()
        )?;
        writeln!(
            self.writer(),
            "{}",
            format!("+++ {}", b.diff_path().display()).bold()
        )?;

        let edits = MyersDiff::new(&a.data, &b.data).diff();
        for hunk in Hunk::build(&edits, DEFAULT_CONTEXT) {
            self.print_diff_hunk(&hunk)?;
        }

        Ok(())
    }

    fn print_diff_hunk(&self, hunk: &Hunk<String>) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", hunk.header().cyan())?;

        for edit in hunk.edits() {
            let line = edit.to_string();
            let line = match edit {
                Edit::Delete { .. } => line.red().to_string(),
                Edit::Insert { .. } => line.green().to_string(),
                Edit::Equal { .. } => line,
            };
            writeln!(self.writer(), "{line}")?;
        }

        Ok(())
    }
}
