//! Content-addressable object store
//!
//! Objects live under `objects/<2 hex>/<38 hex>` as zlib-compressed records
//! `<type> <size>\0<payload>`. Records are immutable: storing an object
//! that already exists is a no-op, and every read re-hashes the record to
//! detect tampering.

use crate::artifacts::objects::MIN_ABBREVIATED_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable, frame_record, hash_record};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::objects::tree_walker::{FlatTree, TreeWalker};
use crate::artifacts::core::atomic_file::write_atomically;
use crate::errors::BitError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Digest of a payload of the given kind, without touching the disk
    pub fn hash_object(object_type: ObjectType, payload: &[u8]) -> anyhow::Result<ObjectId> {
        hash_record(object_type, payload)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Store a raw payload and return its digest
    pub fn put(&self, object_type: ObjectType, payload: &[u8]) -> anyhow::Result<ObjectId> {
        let object_id = hash_record(object_type, payload)?;
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object_type, "object already stored");
            return Ok(object_id);
        }

        let record = Self::compress(frame_record(object_type, payload))?;
        write_atomically(&object_path, &record)
            .context(format!("Unable to write object {object_id}"))?;
        tracing::debug!(oid = %object_id, kind = %object_type, size = payload.len(), "stored object");

        Ok(object_id)
    }

    /// Store a typed object and return its digest
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.put(object.object_type(), &object.serialize()?)
    }

    /// Read back the kind and payload of an object, verifying its integrity
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_path = self.object_path(object_id);

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(BitError::ObjectNotFound(object_id.clone()).into());
            }
            Err(error) => {
                return Err(error).context(format!(
                    "Unable to read object file {}",
                    object_path.display()
                ));
            }
        };

        let corrupt = |reason: String| BitError::ObjectCorrupt {
            oid: object_id.clone(),
            reason,
        };

        let record = Self::decompress(compressed.into())
            .map_err(|error| corrupt(format!("{error:#}")))?;
        let (object_type, payload) = Self::split_record(&record).map_err(corrupt)?;

        if hash_record(object_type, &payload)? != *object_id {
            return Err(corrupt("content does not match its digest".to_string()).into());
        }

        Ok((object_type, payload))
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, payload) = self.get(object_id)?;
        let reader = Cursor::new(payload);

        let object = match object_type {
            ObjectType::Blob => ObjectBox::Blob(Box::new(Blob::deserialize(reader)?)),
            ObjectType::Tree => ObjectBox::Tree(Box::new(self.deserialize(object_id, reader)?)),
            ObjectType::Commit => {
                ObjectBox::Commit(Box::new(self.deserialize(object_id, reader)?))
            }
        };

        Ok(object)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let payload = self.get_expecting(object_id, ObjectType::Blob)?;
        Blob::deserialize(Cursor::new(payload))
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let payload = self.get_expecting(object_id, ObjectType::Tree)?;
        self.deserialize(object_id, Cursor::new(payload))
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let payload = self.get_expecting(object_id, ObjectType::Commit)?;
        self.deserialize(object_id, Cursor::new(payload))
    }

    /// Files of the tree a commit points at; empty for no commit
    pub fn load_commit_tree(&self, commit_oid: Option<&ObjectId>) -> anyhow::Result<FlatTree> {
        let Some(commit_oid) = commit_oid else {
            return Ok(FlatTree::new());
        };

        let commit = self.parse_object_as_commit(commit_oid)?;
        TreeWalker::new(self).walk(commit.tree_oid())
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.get(object_id)?;
        Ok(object_type)
    }

    fn get_expecting(&self, object_id: &ObjectId, expected: ObjectType) -> anyhow::Result<Bytes> {
        let (actual, payload) = self.get(object_id)?;

        if actual != expected {
            return Err(BitError::UnexpectedObjectType {
                oid: object_id.clone(),
                expected,
                actual,
            }
            .into());
        }

        Ok(payload)
    }

    // A payload that hashes correctly but does not parse is still corrupt.
    fn deserialize<T: Unpackable>(
        &self,
        object_id: &ObjectId,
        reader: Cursor<Bytes>,
    ) -> anyhow::Result<T> {
        T::deserialize(reader).map_err(|error| {
            BitError::ObjectCorrupt {
                oid: object_id.clone(),
                reason: format!("{error:#}"),
            }
            .into()
        })
    }

    fn split_record(record: &Bytes) -> Result<(ObjectType, Bytes), String> {
        let header_end = record
            .iter()
            .position(|byte| *byte == 0)
            .ok_or("missing header terminator")?;
        let header = std::str::from_utf8(&record[..header_end])
            .map_err(|_| "header is not valid UTF-8".to_string())?;

        let (object_type, size) = header
            .split_once(' ')
            .ok_or(format!("malformed header '{header}'"))?;
        let object_type =
            ObjectType::try_from(object_type).map_err(|error| format!("{error:#}"))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| format!("malformed size '{size}'"))?;

        let payload = record.slice(header_end + 1..);
        if payload.len() != size {
            return Err(format!(
                "declared size {size} differs from payload size {}",
                payload.len()
            ));
        }

        Ok((object_type, payload))
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    /// Find all objects whose digest starts with the given prefix.
    ///
    /// Prefixes shorter than four hex characters match nothing. Temp files
    /// left in the fan-out directories are skipped.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if !ObjectId::is_hex_prefix(prefix) || prefix.len() < MIN_ABBREVIATED_LENGTH {
            return Ok(Vec::new());
        }

        let prefix = prefix.to_ascii_lowercase();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }
        matches.sort();

        Ok(matches)
    }
}
