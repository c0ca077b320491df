use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::resolve_object;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree_walker::TreeWalker;
use crate::errors::BitError;

impl Repository {
    /// List a tree, or the tree of a commit
    ///
    /// With `recursive`, subtrees are expanded and only files are listed,
    /// each with its full path.
    pub fn ls_tree(&self, object: &str, recursive: bool) -> anyhow::Result<()> {
        let oid = resolve_object(object, self)?;
        let tree_oid = self.peel_to_tree(oid)?;

        if recursive {
            let files = TreeWalker::new(self.database()).walk(&tree_oid)?;

            for (path, entry) in files {
                writeln!(self.writer(), "{}\t{}", entry.listing(), path.display())?;
            }
        } else {
            let tree = self.database().parse_object_as_tree(&tree_oid)?;
            if !tree.is_empty() {
                writeln!(self.writer(), "{}", tree.display())?;
            }
        }

        Ok(())
    }

    fn peel_to_tree(&self, oid: ObjectId) -> anyhow::Result<ObjectId> {
        match self.database().get_object_type(&oid)? {
            ObjectType::Tree => Ok(oid),
            ObjectType::Commit => {
                let commit = self.database().parse_object_as_commit(&oid)?;
                Ok(commit.tree_oid().clone())
            }
            actual @ ObjectType::Blob => Err(BitError::UnexpectedObjectType {
                oid,
                expected: ObjectType::Tree,
                actual,
            }
            .into()),
        }
    }
}
