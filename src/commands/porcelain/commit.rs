use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Snapshot the index as a new commit on top of HEAD
    ///
    /// Fails with `NothingToCommit` when the staged tree equals HEAD's tree.
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        let index = self.load_index()?;
        let tree_oid = self.store_index_tree(&index)?;

        let is_root = self.refs().read_head()?.is_none();
        let author = Author::load_from_env()?;
        let message = message.trim().to_string();

        let commit_oid = CommitGraph::new(self).commit(tree_oid, message.clone(), author)?;

        let location = match self.refs().head()? {
            Head::Symbolic(branch) => branch.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        };
        let root_marker = if is_root { " (root-commit)" } else { "" };
        let summary = message.lines().next().unwrap_or_default();

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            location,
            root_marker,
            commit_oid.to_short_oid(),
            summary
        )?;

        Ok(commit_oid)
    }
}
