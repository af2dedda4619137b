use crate::areas::repository::Repository;
use crate::artifacts::core::errors::UserError;

impl Repository {
    pub async fn add(&mut self, file: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = self
            .workspace()
            .relative_path(file)
            .ok_or(UserError::FileDoesNotExist)?;
        if !self.workspace().file_exists(&path) {
            return Err(UserError::FileDoesNotExist.into());
        }

        let (_, head) = self.head_commit()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = self.database().store(&blob)?;
        index.stage_for_addition(path.clone(), blob_id, head.tracked(&path));

        index.write_updates()?;

        Ok(())
    }
}
