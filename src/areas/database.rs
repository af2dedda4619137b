//! Object store
//!
//! Blobs and commits live under `.gitlet/objects/xx/yyyy...`, zlib compressed, keyed by the
//! SHA-1 of their framed content. Objects are written once and never edited: storing the
//! same content again is a no-op.

use crate::artifacts::core::errors::InvariantViolation;
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

/// Memoizes the slim form of commits during a graph query
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        oid: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(commit) = self.commits.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let commit = database.load_commit(oid)?.to_slim(oid.clone());
        self.commits
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(commit)
    }
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Graph view over the commits of this store
    pub fn commit_graph<'d>(
        &'d self,
        cache: &'d CommitCache,
    ) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + 'd> {
        CommitGraph::new(move |oid: &ObjectId| cache.get_or_load_slim_commit(self, oid))
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Raw (framed, uncompressed) bytes of an object
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Err(InvariantViolation::MissingObject(object_id.clone()).into());
        }

        self.read_object(object_path)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::digest(&object_content);

        self.write_if_missing(&object_id, object_content)?;

        Ok(object_id)
    }

    /// Store framed bytes copied from another store, checking they hash to `object_id`
    pub fn store_raw(&self, object_id: &ObjectId, object_content: Bytes) -> anyhow::Result<()> {
        let actual = ObjectId::digest(&object_content);
        if &actual != object_id {
            return Err(InvariantViolation::DigestMismatch {
                expected: object_id.clone(),
                actual,
            }
            .into());
        }

        self.write_if_missing(object_id, object_content)
    }

    fn write_if_missing(&self, object_id: &ObjectId, object_content: Bytes) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object_content)?;
        tracing::debug!(oid = %object_id, "stored object");

        Ok(())
    }

    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            _ => anyhow::bail!("object {object_id} is not a blob"),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Load a commit that must exist
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object_as_commit(object_id)?
            .ok_or_else(|| InvariantViolation::NotACommit(object_id.clone()).into())
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::read_header(&mut object_reader)?;
        let body_size = object_reader.get_ref().len() - object_reader.position() as usize;
        if body_size != size {
            anyhow::bail!("object {object_id} declares {size} bytes but holds {body_size}");
        }

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
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

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Every stored object ID, in digest order
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut objects = WalkDir::new(&self.path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let dir_name = entry.path().parent()?.file_name()?.to_str()?;
                let file_name = entry.file_name().to_str()?;

                ObjectId::try_parse(format!("{dir_name}{file_name}")).ok()
            })
            .collect::<Vec<_>>();
        objects.sort();

        Ok(objects)
    }

    /// Every stored commit ID, in digest order
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.list_objects()?
            .into_iter()
            .filter_map(|oid| match self.object_type(&oid) {
                Ok(ObjectType::Commit) => Some(Ok(oid)),
                Ok(_) => None,
                Err(error) => Some(Err(error)),
            })
            .collect()
    }

    /// Find all objects whose ID starts with the given prefix, in digest order
    ///
    /// For prefixes of 2+ characters only the matching fan-out directory is read.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 {
            return Ok(self
                .list_objects()?
                .into_iter()
                .filter(|oid| oid.starts_with(&prefix))
                .collect());
        }

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

    /// Resolve a full or abbreviated commit ID
    ///
    /// Ambiguous prefixes resolve to the first matching commit in digest order.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<Option<ObjectId>> {
        if prefix.is_empty()
            || prefix.len() > OBJECT_ID_LENGTH
            || !prefix.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Ok(None);
        }

        let candidates = self
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .filter(|oid| matches!(self.object_type(oid), Ok(ObjectType::Commit)))
            .collect::<Vec<_>>();

        if candidates.len() > 1 {
            tracing::warn!(
                prefix,
                candidates = candidates.len(),
                "ambiguous commit id, using the first match"
            );
        }

        Ok(candidates.into_iter().next())
    }
}
