use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;

/// What a tree records for one name: the target digest and its mode
///
/// Two entries are equal only when both the content and the mode match, so
/// an executable bit flip counts as a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct DatabaseEntry {
    pub oid: ObjectId,
    pub mode: EntryMode,
}

impl DatabaseEntry {
    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }

    /// Kind of object the entry points at, derived from its mode
    pub fn object_type(&self) -> ObjectType {
        if self.is_tree() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }

    /// `<mode> <type> <oid>`, the listing prefix used by `ls-tree`
    pub fn listing(&self) -> String {
        format!("{:0>6} {} {}", self.mode.as_str(), self.object_type(), self.oid)
    }
}
