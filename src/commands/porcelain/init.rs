use crate::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(UserError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;

        let root_oid = self.database().store(&Commit::root())?;
        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;

        self.refs()
            .move_branch(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_current_branch(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        index.reset();
        index.write_updates()?;

        tracing::info!(path = %self.path().display(), root = %root_oid, "initialized repository");

        Ok(())
    }
}
