use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChange;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Compares the work tree against HEAD and the staging area
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Blob ID the work-tree file would get, or `None` if the file is missing
    pub fn workspace_blob_id(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if !self.repository.workspace().file_exists(path) {
            return Ok(None);
        }

        let blob = self.repository.workspace().parse_blob(path)?;
        Ok(Some(blob.object_id()?))
    }

    fn compare(&self, path: &Path, expected: &ObjectId) -> anyhow::Result<Option<WorkspaceChange>> {
        Ok(match self.workspace_blob_id(path)? {
            None => Some(WorkspaceChange::Deleted),
            Some(actual) if &actual != expected => Some(WorkspaceChange::Modified),
            Some(_) => None,
        })
    }

    /// Files whose work-tree content is not what the next commit would record
    ///
    /// Staged additions are compared against their staged blob; paths tracked by HEAD and
    /// not staged either way are compared against HEAD.
    pub fn unstaged_changes(
        &self,
        head: &Snapshot,
        index: &Index,
    ) -> anyhow::Result<BTreeMap<PathBuf, WorkspaceChange>> {
        let mut changes = BTreeMap::new();

        for (path, oid) in index.additions() {
            if let Some(change) = self.compare(path, oid)? {
                changes.insert(path.clone(), change);
            }
        }

        let unstaged_tracked = head.iter().filter(|(path, _)| {
            index.staged_addition(path).is_none() && !index.is_staged_for_removal(path)
        });
        for (path, oid) in unstaged_tracked {
            if let Some(change) = self.compare(path, oid)? {
                changes.insert(path.clone(), change);
            }
        }

        Ok(changes)
    }

    /// Work-tree files the next commit would not record
    pub fn untracked_files(&self, head: &Snapshot, index: &Index) -> anyhow::Result<BTreeSet<PathBuf>> {
        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| index.staged_addition(path).is_none())
            .filter(|path| !head.contains_key(path) || index.is_staged_for_removal(path))
            .collect())
    }
}
