//! Snapshot reconciliation
//!
//! Walks every path of `split ∪ current ∪ given`, classifies it, and builds the merged
//! snapshot on top of the current one. Conflicting paths get a freshly stored blob holding
//! the conflict-marker text; the caller later writes it to the work tree through the
//! regular current-to-merged migration.

use crate::artifacts::merge::classifier::{MergeOutcome, classify};
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub snapshot: Snapshot,
    pub conflicts: BTreeSet<PathBuf>,
}

impl MergeResult {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

#[derive(Debug, new)]
pub struct ThreeWayMerge<'s> {
    split: &'s Snapshot,
    current: &'s Snapshot,
    given: &'s Snapshot,
}

impl ThreeWayMerge<'_> {
    /// Outcome for every path any of the three snapshots tracks
    pub fn outcomes(&self) -> BTreeMap<PathBuf, MergeOutcome> {
        let paths = self
            .split
            .keys()
            .chain(self.current.keys())
            .chain(self.given.keys())
            .collect::<BTreeSet<_>>();

        paths
            .into_iter()
            .map(|path| {
                let outcome = classify(
                    self.split.get(path),
                    self.current.get(path),
                    self.given.get(path),
                );
                debug_log!(path = %path.display(), ?outcome, "classified");

                (path.clone(), outcome)
            })
            .collect()
    }

    /// Build the merged snapshot
    ///
    /// `read_blob` loads blob contents for conflicting sides; `store_blob` persists the
    /// conflict-marker blobs and returns their IDs.
    pub fn resolve(
        &self,
        read_blob: impl Fn(&ObjectId) -> anyhow::Result<Bytes>,
        mut store_blob: impl FnMut(Blob) -> anyhow::Result<ObjectId>,
    ) -> anyhow::Result<MergeResult> {
        let mut snapshot = self.current.clone();
        let mut conflicts = BTreeSet::new();

        for (path, outcome) in self.outcomes() {
            match outcome {
                MergeOutcome::KeepCurrent => {}
                MergeOutcome::TakeGiven(oid) => {
                    snapshot.insert(path, oid);
                }
                MergeOutcome::Remove => {
                    snapshot.remove(&path);
                }
                MergeOutcome::Conflict { current, given } => {
                    let current = current.as_ref().map(&read_blob).transpose()?;
                    let given = given.as_ref().map(&read_blob).transpose()?;
                    let content = conflict_content(current.as_deref(), given.as_deref());

                    let oid = store_blob(Blob::new(content))?;
                    snapshot.insert(path.clone(), oid);
                    conflicts.insert(path);
                }
            }
        }

        tracing::debug!(
            paths = snapshot.len(),
            conflicts = conflicts.len(),
            "reconciled snapshots"
        );

        Ok(MergeResult {
            snapshot,
            conflicts,
        })
    }
}
