use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::resolve_object;
use crate::artifacts::objects::object::ObjectBox;

impl Repository {
    /// Print an object's payload, or only its type with `show_type`
    ///
    /// Blobs are written byte for byte; trees and commits in their readable
    /// form.
    pub fn cat_file(&self, object: &str, show_type: bool) -> anyhow::Result<()> {
        let oid = resolve_object(object, self)?;

        if show_type {
            let object_type = self.database().get_object_type(&oid)?;
            writeln!(self.writer(), "{object_type}")?;
            return Ok(());
        }

        match self.database().parse_object(&oid)? {
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            object @ (ObjectBox::Tree(_) | ObjectBox::Commit(_)) => {
                writeln!(self.writer(), "{}", object.display())?
            }
        }

        Ok(())
    }
}
