//! Staging area
//!
//! Holds what the next commit changes relative to HEAD: paths staged for addition (with the
//! blob ID of the staged content) and paths staged for removal.
//!
//! Two invariants keep "are there uncommitted changes" a plain emptiness check:
//! - a path is never staged for addition with the blob HEAD already tracks for it
//! - a path is never staged for both addition and removal
//!
//! ## Index File Format
//!
//! See [`crate::artifacts::index`]: header, entries in path order (additions and removals
//! interleaved), then a SHA-1 checksum verified on load.

use crate::artifacts::core::errors::UserError;
use crate::artifacts::index::checksum::ChecksummedFile;
use crate::artifacts::index::index_entry::{ENTRY_BLOCK, ENTRY_MIN_SIZE, IndexEntry, StagedChange};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// What `stage_for_removal` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// A pending addition was dropped
    Unstaged,
    /// The tracked path will leave the next commit; its working file should go too
    StagedForRemoval,
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty staging area.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .with_context(|| format!("failed to open index at {:?}", self.path()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = ChecksummedFile::new(lock);
        let entries_count = self.parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(&self, reader: &mut ChecksummedFile) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        Ok(header.entries_count)
    }

    /// Parse all entries, growing each read one block at a time until its NUL padding
    fn parse_entries(&mut self, entries_count: u32, reader: &mut ChecksummedFile) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let mut entry_bytes = reader.read(ENTRY_MIN_SIZE)?.to_vec();

            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes.extend_from_slice(&reader.read(ENTRY_BLOCK)?);
            }

            let entry = IndexEntry::deserialize(std::io::Cursor::new(Bytes::from(entry_bytes)))?;
            match entry.change {
                StagedChange::Addition(oid) => {
                    self.additions.insert(entry.name, oid);
                }
                StagedChange::Removal => {
                    self.removals.insert(entry.name);
                }
            }
        }

        Ok(())
    }

    /// Persist the staging area if anything changed since it was loaded
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .with_context(|| format!("failed to open index at {:?}", self.path()))?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = ChecksummedFile::new(lock);

        let entries = self.entries();
        let header = IndexHeader::new(u32::try_from(entries.len())?);
        writer.write(&header.serialize()?)?;

        for entry in entries {
            writer.write(&entry.serialize()?)?;
        }

        writer.seal()?;
        self.changed = false;
        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "wrote index"
        );

        Ok(())
    }

    /// Stage `oid` as the next content of `path`
    ///
    /// When `oid` is what HEAD already tracks, any pending addition is dropped instead.
    /// Either way the path is no longer staged for removal.
    pub fn stage_for_addition(
        &mut self,
        path: PathBuf,
        oid: ObjectId,
        tracked_in_head: Option<&ObjectId>,
    ) {
        self.removals.remove(&path);

        if tracked_in_head == Some(&oid) {
            self.additions.remove(&path);
        } else {
            self.additions.insert(path, oid);
        }

        self.changed = true;
    }

    /// Drop a pending addition, or stage a HEAD-tracked path for removal
    pub fn stage_for_removal(
        &mut self,
        path: &Path,
        tracked_in_head: bool,
    ) -> anyhow::Result<RemovalOutcome> {
        if self.additions.remove(path).is_some() {
            self.changed = true;
            return Ok(RemovalOutcome::Unstaged);
        }

        if tracked_in_head && !self.removals.contains(path) {
            self.removals.insert(path.to_path_buf());
            self.changed = true;
            return Ok(RemovalOutcome::StagedForRemoval);
        }

        Err(UserError::NothingToRemove.into())
    }

    pub fn staged_addition(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.additions.is_empty() || !self.removals.is_empty()
    }

    /// The snapshot the next commit records: `base` minus removals plus additions
    pub fn apply_to(&self, base: &Snapshot) -> Snapshot {
        let mut snapshot = base.clone();

        for path in &self.removals {
            snapshot.remove(path);
        }
        for (path, oid) in &self.additions {
            snapshot.insert(path.clone(), oid.clone());
        }

        snapshot
    }

    /// Empty the staging area
    pub fn reset(&mut self) {
        self.clear();
        self.changed = true;
    }

    fn entries(&self) -> Vec<IndexEntry> {
        let mut entries = self
            .additions
            .iter()
            .map(|(path, oid)| IndexEntry::new(path.clone(), StagedChange::Addition(oid.clone())))
            .chain(
                self.removals
                    .iter()
                    .map(|path| IndexEntry::new(path.clone(), StagedChange::Removal)),
            )
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        entries
    }
}
