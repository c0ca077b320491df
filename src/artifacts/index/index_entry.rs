//! Index entry representation
//!
//! Each entry records a tracked file with its repository-relative path, the
//! digest of its staged content and its file mode.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Index entry representing a tracked file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub name: PathBuf,
    /// Digest of the staged blob
    pub oid: ObjectId,
    /// File mode recorded for the next commit
    pub mode: FileMode,
}

impl IndexEntry {
    pub fn basename(&self) -> anyhow::Result<&str> {
        self.name
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name"))
    }

    /// Ancestor directories of the entry, outermost first
    pub fn parent_dirs(&self) -> Vec<&Path> {
        let mut dirs = self
            .name
            .ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty())
            .collect::<Vec<_>>();
        dirs.reverse();

        dirs
    }

    pub fn to_database_entry(&self) -> DatabaseEntry {
        DatabaseEntry::new(self.oid.clone(), EntryMode::File(self.mode))
    }

    /// Render the entry as one index file record (without the newline)
    pub fn to_record(&self) -> anyhow::Result<String> {
        let name = self
            .name
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid entry name {}", self.name.display()))?;

        Ok(format!(
            "{} {} {}",
            EntryMode::File(self.mode).as_str(),
            self.oid,
            name
        ))
    }

    /// Parse one index file record, reporting the reason on failure
    pub fn parse_record(record: &str) -> Result<Self, String> {
        let mut fields = record.splitn(3, ' ');
        let (Some(mode), Some(oid), Some(name)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err("expected '<mode> <oid> <path>'".to_string());
        };

        let mode = EntryMode::from_octal_str(mode)
            .ok()
            .and_then(|mode| FileMode::try_from(mode).ok())
            .ok_or_else(|| format!("invalid file mode '{mode}'"))?;
        let oid = ObjectId::try_parse(oid.to_string())
            .map_err(|_| format!("invalid object id '{oid}'"))?;
        let name = PathBuf::from(name);
        validate_path(&name)?;

        Ok(Self::new(name, oid, mode))
    }
}

/// Check that `path` can be stored in the index and in trees
///
/// Paths must be relative, non-empty, valid UTF-8, free of `.`/`..`
/// components and free of newline and NUL characters.
pub fn validate_path(path: &Path) -> Result<(), String> {
    let Some(raw) = path.to_str() else {
        return Err(format!("path {} is not valid UTF-8", path.display()));
    };
    if raw.is_empty() {
        return Err("empty path".to_string());
    }
    if raw.contains(['\n', '\0']) || raw.ends_with('/') {
        return Err(format!("invalid path '{}'", raw.escape_debug()));
    }

    if raw
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(format!("path '{raw}' must be relative and normalized"));
    }

    Ok(())
}
