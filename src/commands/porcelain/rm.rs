use crate::areas::index::RemovalOutcome;
use crate::areas::repository::Repository;
use crate::artifacts::core::errors::UserError;

impl Repository {
    pub async fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self
            .workspace()
            .relative_path(file)
            .ok_or(UserError::NothingToRemove)?;
        let (_, head) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let outcome = index.stage_for_removal(&path, head.tracked(&path).is_some())?;
        index.write_updates()?;

        if outcome == RemovalOutcome::StagedForRemoval {
            self.workspace().remove_file(&path)?;
        }

        Ok(())
    }
}
