use crate::areas::repository::Repository;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(UserError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if !index.has_pending_changes() {
            return Err(UserError::NoChanges.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let snapshot = index.apply_to(head.snapshot());

        self.write_commit((&head_oid, &head), None, snapshot, message.to_string())?;

        index.reset();
        index.write_updates()?;

        Ok(())
    }

    /// Store a commit on top of HEAD and move the current branch to it
    pub(crate) fn write_commit(
        &self,
        parent: (&ObjectId, &Commit),
        merge_parent: Option<(&ObjectId, &Commit)>,
        snapshot: Snapshot,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let mut parents = vec![parent.1];
        parents.extend(merge_parent.map(|(_, commit)| commit));

        let commit = Commit::new(
            parent.0.clone(),
            merge_parent.map(|(oid, _)| oid.clone()),
            snapshot,
            message,
            Commit::next_timestamp(&parents),
        );
        let commit_id = self.database().store(&commit)?;

        let current_branch = self.refs().current_branch_name()?;
        self.refs().move_branch(&current_branch, &commit_id)?;

        tracing::info!(
            branch = %current_branch,
            commit = %commit_id,
            files = commit.snapshot().len(),
            "committed"
        );

        Ok(commit_id)
    }
}
