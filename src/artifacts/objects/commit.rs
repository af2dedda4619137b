//! Commit object
//!
//! Commits record a snapshot of the tracked files at a point in time.
//! They contain:
//! - A timestamp (second precision, with its UTC offset)
//! - The main parent commit ID (absent only for the root commit)
//! - The second parent commit ID (merge commits only)
//! - The snapshot: tracked path to blob ID, in path order
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <unix-seconds> <+hhmm>
//! parent <main-parent-sha>
//! parent <second-parent-sha>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! The ID is the hash of that whole text, so it covers timestamp, message, snapshot and
//! parents. Commits are immutable: every field is fixed at construction.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Timelike};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Message of the root commit shared by every repository
pub const ROOT_MESSAGE: &str = "initial commit";

/// Mapping from tracked file path to blob ID
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Slim representation of a commit
///
/// Contains only what graph traversal needs: identity, parents and timestamp.
/// The main parent is always first in `parents`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs, main parent first
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for comparison)
    pub timestamp: DateTime<FixedOffset>,
}

impl SlimCommit {
    pub fn main_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    timestamp: DateTime<FixedOffset>,
    message: String,
    snapshot: Snapshot,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
}

impl Commit {
    /// The root commit: epoch timestamp, fixed message, no files, no parents
    ///
    /// It is byte-identical in every repository, so independently initialized
    /// repositories share it.
    pub fn root() -> Self {
        Commit {
            timestamp: DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            message: ROOT_MESSAGE.to_string(),
            snapshot: Snapshot::new(),
            parent: None,
            merge_parent: None,
        }
    }

    /// Create a regular or merge commit
    ///
    /// # Arguments
    ///
    /// * `parent` - Main parent commit ID
    /// * `merge_parent` - Second parent, present iff this is a merge commit
    /// * `snapshot` - Tracked files of the new commit
    /// * `message` - Commit message
    /// * `timestamp` - Creation time, see [`Commit::next_timestamp`]
    pub fn new(
        parent: ObjectId,
        merge_parent: Option<ObjectId>,
        snapshot: Snapshot,
        message: String,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            message,
            snapshot,
            parent: Some(parent),
            merge_parent,
        }
    }

    /// Timestamp for a commit with the given parents
    ///
    /// Current local time truncated to seconds, but never earlier than any parent, so
    /// timestamps never decrease along parent edges.
    pub fn next_timestamp(parents: &[&Commit]) -> DateTime<FixedOffset> {
        let now = chrono::Local::now().fixed_offset();
        let now = now.with_nanosecond(0).unwrap_or(now);

        parents
            .iter()
            .map(|parent| parent.timestamp)
            .filter(|timestamp| *timestamp > now)
            .max()
            .map(|latest| latest.with_timezone(now.offset()))
            .unwrap_or(now)
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    /// Parent IDs, main parent first
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.merge_parent.iter())
            .cloned()
            .collect()
    }

    /// Blob ID tracked for `path`, if any
    pub fn tracked(&self, path: &Path) -> Option<&ObjectId> {
        self.snapshot.get(path)
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents(),
            timestamp: self.timestamp,
        }
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Nov 9 20:00:05 2017 -0800"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

fn parse_offset(offset: &str) -> anyhow::Result<FixedOffset> {
    let (sign, digits) = match offset.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => anyhow::bail!("Invalid timezone offset: {offset}"),
    };
    if digits.len() != 4 {
        anyhow::bail!("Invalid timezone offset: {offset}");
    }

    let hours = digits[..2].parse::<i32>()?;
    let minutes = digits[2..].parse::<i32>()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow::anyhow!("Invalid timezone offset: {offset}"))
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, offset) = value
        .split_once(' ')
        .context("Invalid commit object: malformed timestamp")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: timestamp is not a number")?;
    let offset = parse_offset(offset)?;

    let datetime = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid timestamp {seconds}"))?;

    Ok(datetime.with_timezone(&offset))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )];

        for parent in self.parent.iter().chain(self.merge_parent.iter()) {
            object_content.push(format!("parent {parent}"));
        }
        for (path, oid) in &self.snapshot {
            let path = path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid path in snapshot: {:?}", path))?;
            object_content.push(format!("file {oid} {path}"));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        Ok(frame(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = parse_timestamp(timestamp)?;

        let mut parents = Vec::new();
        let mut snapshot = Snapshot::new();
        for line in lines {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: malformed file line")?;
                snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line '{line}'");
            }
        }

        if parents.len() > 2 {
            anyhow::bail!("Invalid commit object: too many parents");
        }
        let mut parents = parents.into_iter();

        Ok(Commit {
            timestamp,
            message: message.to_string(),
            snapshot,
            parent: parents.next(),
            merge_parent: parents.next(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
