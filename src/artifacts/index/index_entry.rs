//! Staging entry representation
//!
//! Each entry is either a pending addition (path and the blob ID of the staged content)
//! or a pending removal (path only). Entries are stored with 8-byte alignment and always
//! end with at least one NUL byte, which is how the reader finds their end.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::cmp::min;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Largest path length representable in the flags
const MAX_PATH_SIZE: usize = 0x0fff;

/// Flag bit marking a removal entry
const REMOVAL_FLAG: u16 = 0x8000;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Smallest possible entry (20-byte ID, 2-byte flags, 1-byte path, NUL), block aligned
pub const ENTRY_MIN_SIZE: usize = 24;

/// What is pending for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// Content with this blob ID goes into the next commit
    Addition(ObjectId),
    /// The path leaves the next commit's snapshot
    Removal,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to the work tree root
    pub name: PathBuf,
    pub change: StagedChange,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let entry_name = self
            .name
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid entry name {:?}", self.name))?;
        if entry_name.is_empty() {
            anyhow::bail!("Index entries need a path");
        }

        let (oid, mut flags) = match &self.change {
            StagedChange::Addition(oid) => (oid.clone(), 0),
            StagedChange::Removal => (ObjectId::null(), REMOVAL_FLAG),
        };
        flags |= min(entry_name.len(), MAX_PATH_SIZE) as u16;

        let mut entry_bytes = Vec::new();
        oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(flags)?;
        entry_bytes.write_all(entry_name.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        if bytes.len() < ENTRY_MIN_SIZE {
            return Err(anyhow::anyhow!("Invalid index entry size"));
        }

        let oid = ObjectId::read_h40_from(&mut &bytes[0..20])?;
        let flags = byteorder::NetworkEndian::read_u16(&bytes[20..22]);

        // Extract the entry name, which is null-terminated
        let name_end = bytes[22..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| anyhow::anyhow!("Missing null terminator in entry name"))?;
        let name = std::str::from_utf8(&bytes[22..22 + name_end])
            .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in entry name"))?;

        let change = if flags & REMOVAL_FLAG != 0 {
            StagedChange::Removal
        } else {
            StagedChange::Addition(oid)
        };

        Ok(IndexEntry::new(PathBuf::from(name), change))
    }
}
