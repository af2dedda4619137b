use crate::areas::database::{CommitCache, Database};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Copies history from one object store into another
///
/// Only commits the destination lacks are visited; each one's blobs are copied before the
/// commit itself and parents before children, so the destination never holds a commit
/// whose parents or files are missing. Copied bytes are re-hashed on arrival.
#[derive(new)]
pub struct Replicator<'s> {
    source: &'s Database,
    destination: &'s Database,
}

impl Replicator<'_> {
    /// Copy everything reachable from `head`, returning the number of commits copied
    pub fn copy_history(&self, head: &ObjectId) -> anyhow::Result<usize> {
        let cache = CommitCache::new();
        let graph = self.source.commit_graph(&cache);
        let missing = graph.missing_ancestry(head, |oid| self.destination.contains(oid))?;

        for oid in &missing {
            let commit = self.source.load_commit(oid)?;

            for blob_id in commit.snapshot().values() {
                self.copy_object(blob_id)?;
            }
            self.copy_object(oid)?;
        }

        tracing::info!(head = %head, commits = missing.len(), "replicated history");

        Ok(missing.len())
    }

    fn copy_object(&self, oid: &ObjectId) -> anyhow::Result<()> {
        if self.destination.contains(oid) {
            return Ok(());
        }

        let content = self.source.load(oid)?;
        self.destination.store_raw(oid, content)
    }
}
