use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeBuilder;

impl Repository {
    /// Store the tree objects described by the index and print the root id
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let index = self.load_index()?;
        let tree_oid = self.store_index_tree(&index)?;

        writeln!(self.writer(), "{tree_oid}")?;

        Ok(tree_oid)
    }

    pub(crate) fn store_index_tree(&self, index: &Index) -> anyhow::Result<ObjectId> {
        TreeBuilder::build(index.entries())?.write(self.database())
    }
}
