use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::checkout::untracked::guard_untracked;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// Restore a file to its version in HEAD
    pub fn checkout_file(&mut self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head) = self.head_commit()?;
        self.restore_file(&head, file)
    }

    /// Restore a file to its version in the commit an (abbreviated) ID names
    pub fn checkout_file_from_commit(&mut self, commit_id: &str, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let oid = self
            .database()
            .resolve_commit_prefix(commit_id)?
            .ok_or(UserError::NoSuchCommit)?;
        let commit = self.database().load_commit(&oid)?;

        self.restore_file(&commit, file)
    }

    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = BranchName::try_parse(name.to_string())
            .map_err(|_| UserError::NoSuchBranchToCheckout)?;
        let target_oid = self
            .refs()
            .resolve(&branch)?
            .ok_or(UserError::NoSuchBranchToCheckout)?;

        if self.refs().is_current_branch(&branch)? {
            return Err(UserError::AlreadyOnBranch.into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (_, head) = self.head_commit()?;
        let target = self.database().load_commit(&target_oid)?;
        self.move_work_tree(&index, &head, &target)?;

        self.refs().set_current_branch(&branch)?;
        index.reset();
        index.write_updates()?;

        Ok(())
    }

    /// Replace the files tracked by `from` with those tracked by `to`
    ///
    /// Refused without any change when an untracked file would be overwritten.
    pub(crate) fn move_work_tree(
        &self,
        index: &Index,
        from: &Commit,
        to: &Commit,
    ) -> anyhow::Result<()> {
        guard_untracked(self.workspace(), index, from.snapshot(), to.snapshot())?;

        Migration::new(self, from.snapshot(), to.snapshot()).apply_changes()
    }

    fn restore_file(&self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let path = self
            .workspace()
            .relative_path(file)
            .ok_or(UserError::FileNotInCommit)?;
        let blob_id = commit.tracked(&path).ok_or(UserError::FileNotInCommit)?;
        let blob = self.database().parse_object_as_blob(blob_id)?;

        self.workspace().write_file(&path, blob.content())
    }
}
