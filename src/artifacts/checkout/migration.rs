use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::PathBuf;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite a file both snapshots track
    Modify,
}

/// Set of planned actions grouped by type
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

/// Plan and execute the move of the work tree from one snapshot to another
///
/// Files tracked by `to` are written with its version, files tracked only by `from` are
/// deleted, and files neither snapshot tracks are left alone. The staging area is not
/// touched; callers reset it once the work tree has moved.
pub struct Migration<'r> {
    repository: &'r Repository,
    actions: ActionsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, from: &Snapshot, to: &Snapshot) -> Self {
        let mut actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        for path in from.keys().filter(|path| !to.contains_key(*path)) {
            actions
                .entry(ActionType::Delete)
                .or_default()
                .push((path.clone(), None));
        }

        // common paths are rewritten even when the blob is unchanged, discarding local edits
        for (path, oid) in to {
            let action = if from.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };

            actions
                .entry(action)
                .or_default()
                .push((path.clone(), Some(oid.clone())));
        }

        Self {
            repository,
            actions,
        }
    }

    pub fn actions_of(&self, action: ActionType) -> &[(PathBuf, Option<ObjectId>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn apply_changes(&self) -> anyhow::Result<()> {
        self.repository.workspace().apply_migration(self)?;

        tracing::debug!(
            added = self.actions_of(ActionType::Add).len(),
            modified = self.actions_of(ActionType::Modify).len(),
            deleted = self.actions_of(ActionType::Delete).len(),
            "migrated work tree"
        );

        Ok(())
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let blob = self.repository.database().parse_object_as_blob(object_id)?;

        Ok(blob.content().clone())
    }
}
