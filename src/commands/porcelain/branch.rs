use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::UserError;

impl Repository {
    /// Create a branch at HEAD without switching to it
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn remove_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name =
            BranchName::try_parse(name.to_string()).map_err(|_| UserError::NoSuchBranch)?;

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
