//! SHA-1 checksummed reads and writes over a locked index file

use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::{Context, bail};
use bytes::Bytes;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{Read, Write};
use std::ops::DerefMut;

/// A locked file whose every byte read or written so far is hashed
pub struct ChecksummedFile<'f> {
    file: FileGuard<&'f mut File>,
    hasher: Sha1,
}

impl<'f> ChecksummedFile<'f> {
    pub fn new(file: FileGuard<&'f mut File>) -> Self {
        ChecksummedFile {
            file,
            hasher: Sha1::new(),
        }
    }

    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file
            .deref_mut()
            .read_exact(&mut buffer)
            .context("index file ends early")?;
        self.hasher.update(&buffer);

        Ok(Bytes::from(buffer))
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.hasher.update(data);

        Ok(())
    }

    /// Append the digest of everything written
    pub fn seal(mut self) -> anyhow::Result<()> {
        let digest = self.hasher.finalize_reset();
        self.file
            .deref_mut()
            .write_all(&digest)
            .context("failed to write index checksum")
    }

    /// Check the trailing digest against everything read
    pub fn verify(mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.file
            .deref_mut()
            .read_exact(&mut stored)
            .context("index file is missing its checksum")?;

        if stored[..] != self.hasher.finalize_reset()[..] {
            bail!("index checksum does not match its content");
        }

        Ok(())
    }
}
