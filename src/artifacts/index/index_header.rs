use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::{anyhow, bail};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Fixed-size prefix of the staging file
///
/// Only the entry count varies; signature and version are checked on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub entries_count: u32,
}

impl Packable for IndexHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(SIGNATURE.as_bytes());
        bytes.write_u32::<NetworkEndian>(VERSION)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut signature = [0u8; 4];
        reader
            .read_exact(&mut signature)
            .map_err(|_| anyhow!("Index header is truncated"))?;
        if signature != SIGNATURE.as_bytes() {
            bail!("Invalid index file signature");
        }

        let version = reader.read_u32::<NetworkEndian>()?;
        if version != VERSION {
            bail!("Unsupported index file version: {version}");
        }

        Ok(IndexHeader {
            entries_count: reader.read_u32::<NetworkEndian>()?,
        })
    }
}
