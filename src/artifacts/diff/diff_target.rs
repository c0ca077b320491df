use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

const NULL_OID_RAW: &str = "0000000000000000000000000000000000000000";
const NULL_PATH: &str = "/dev/null";

pub type LineSet = Vec<String>;

/// One side of a file diff: a committed or staged blob, a working-tree file,
/// or nothing at all
#[derive(Debug, Clone)]
pub struct DiffTarget {
    pub(crate) file: PathBuf,
    pub(crate) oid: ObjectId,
    pub(crate) mode: Option<EntryMode>,
    pub(crate) data: LineSet,
}

impl DiffTarget {
    /// A blob recorded in a tree or in the index
    pub fn from_entry(
        file: &Path,
        entry: &DatabaseEntry,
        database: &Database,
    ) -> anyhow::Result<Self> {
        let blob = database.parse_object_as_blob(&entry.oid)?;

        Ok(Self {
            file: file.to_path_buf(),
            oid: entry.oid.clone(),
            mode: Some(entry.mode),
            data: blob.lines(),
        })
    }

    pub fn from_file(file: &Path, workspace: &Workspace) -> anyhow::Result<Self> {
        let blob = workspace.parse_blob(file)?;

        Ok(Self {
            file: file.to_path_buf(),
            oid: blob.object_id()?,
            mode: Some(EntryMode::File(workspace.file_mode(file))),
            data: blob.lines(),
        })
    }

    pub fn from_nothing(file: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            file: file.to_path_buf(),
            oid: ObjectId::try_parse(NULL_OID_RAW.to_string())?,
            mode: None,
            data: Vec::new(),
        })
    }

    pub fn diff_path(&self) -> PathBuf {
        if self.mode.is_some() {
            self.file.clone()
        } else {
            Path::new(NULL_PATH).to_path_buf()
        }
    }

    pub fn pretty_mode(&self) -> &'static str {
        self.mode.map_or("100644", |mode| mode.as_str())
    }
}
