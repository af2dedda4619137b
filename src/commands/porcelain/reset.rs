use crate::areas::repository::Repository;
use crate::artifacts::core::errors::UserError;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub async fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self
            .database()
            .resolve_commit_prefix(commit_id)?
            .ok_or(UserError::NoSuchCommit)?;
        let target = self.database().load_commit(&target_oid)?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;
        self.move_work_tree(&index, &head, &target)?;

        let current_branch = self.refs().current_branch_name()?;
        self.refs().move_branch(&current_branch, &target_oid)?;

        index.reset();
        index.write_updates()?;

        Ok(())
    }
}
