use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::BitError;

/// Creates commits on top of HEAD and walks their history
pub struct CommitGraph<'r> {
    repository: &'r Repository,
}

impl<'r> CommitGraph<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        CommitGraph { repository }
    }

    /// Record `tree_oid` as a new commit whose parent is HEAD, then advance
    /// HEAD
    ///
    /// Fails with `NothingToCommit` when the tree equals the parent's tree,
    /// or when the branch is unborn and the tree is empty. Refs are left as
    /// they were on failure.
    pub fn commit(
        &self,
        tree_oid: ObjectId,
        message: String,
        author: Author,
    ) -> anyhow::Result<ObjectId> {
        let database = self.repository.database();
        let refs = self.repository.refs();
        let parent = refs.read_head()?;

        match &parent {
            Some(parent_oid) => {
                let parent_commit = database.parse_object_as_commit(parent_oid)?;
                if parent_commit.tree_oid() == &tree_oid {
                    return Err(BitError::NothingToCommit.into());
                }
            }
            None => {
                if tree_oid == Database::hash_object(ObjectType::Tree, &[])? {
                    return Err(BitError::NothingToCommit.into());
                }
            }
        }

        let commit = Commit::new(parent.into_iter().collect(), tree_oid, author, message);
        let commit_oid = database.store(&commit)?;
        refs.update_head(&commit_oid)?;
        tracing::info!(oid = %commit_oid, "created commit");

        Ok(commit_oid)
    }

    /// Lazy first-parent history starting at `start`
    pub fn history(&self, start: ObjectId) -> RevList<'r> {
        RevList::new(self.repository.database(), start)
    }
}
