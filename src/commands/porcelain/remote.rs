use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::remote::remote_store::RemoteStore;
use crate::artifacts::remote::replicator::Replicator;

impl Repository {
    pub fn add_remote(&mut self, name: &str, location: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.remotes().add(name, location)
    }

    pub fn remove_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.remotes().remove(name)
    }

    /// Send HEAD's history to a remote branch, which must not be ahead of HEAD
    pub fn push(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let remote = self.open_remote(remote_name)?;
        let branch = BranchName::try_parse(branch.to_string())?;
        let head_oid = self.refs().read_head()?;

        // a branch the remote lacks starts at the shared root commit
        let remote_oid = match remote.refs().resolve(&branch)? {
            Some(oid) => oid,
            None => Commit::root().object_id()?,
        };

        let commit_cache = CommitCache::new();
        let graph = self.database().commit_graph(&commit_cache);
        let remote_is_behind = self.database().contains(&remote_oid)
            && graph.is_ancestor(&remote_oid, &head_oid, false)?;
        if !remote_is_behind {
            return Err(UserError::RemoteAhead.into());
        }

        remote.refs().ensure_name_available(&branch)?;

        Replicator::new(self.database(), remote.database()).copy_history(&head_oid)?;
        remote.refs().move_branch(&branch, &head_oid)?;

        Ok(())
    }

    /// Copy a remote branch's history and point `<remote>/<branch>` at its head
    pub fn fetch(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<BranchName> {
        self.ensure_initialized()?;

        let remote = self.open_remote(remote_name)?;
        let branch = BranchName::try_parse(branch.to_string())
            .map_err(|_| UserError::RemoteBranchNotFound)?;
        let remote_oid = remote
            .refs()
            .resolve(&branch)?
            .ok_or(UserError::RemoteBranchNotFound)?;

        let tracking_branch = BranchName::remote_tracking(remote_name, &branch)?;
        self.refs().ensure_name_available(&tracking_branch)?;

        Replicator::new(remote.database(), self.database()).copy_history(&remote_oid)?;
        self.refs().move_branch(&tracking_branch, &remote_oid)?;

        Ok(tracking_branch)
    }

    pub async fn pull(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let tracking_branch = self.fetch(remote_name, branch)?;

        self.merge(tracking_branch.as_ref()).await
    }

    fn open_remote(&self, name: &str) -> anyhow::Result<RemoteStore> {
        let location = self.remotes().get(name)?;
        let remote = RemoteStore::open(&location)?;
        tracing::debug!(remote = name, path = %remote.path().display(), "opened remote");

        Ok(remote)
    }
}
