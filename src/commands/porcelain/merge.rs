use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::checkout::untracked::guard_untracked;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::merge::three_way::ThreeWayMerge;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

const ANCESTOR_NOTICE: &str = "Given branch is an ancestor of the current branch.";
const FAST_FORWARD_NOTICE: &str = "Current branch fast-forwarded.";
const CONFLICT_NOTICE: &str = "Encountered a merge conflict.";

impl Repository {
    pub async fn merge(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.has_pending_changes() {
            return Err(UserError::UncommittedChanges.into());
        }

        let given_branch =
            BranchName::try_parse(name.to_string()).map_err(|_| UserError::NoSuchBranch)?;
        let given_oid = self
            .refs()
            .resolve(&given_branch)?
            .ok_or(UserError::NoSuchBranch)?;

        let current_branch = self.refs().current_branch_name()?;
        if current_branch == given_branch {
            return Err(UserError::MergeWithItself.into());
        }

        let (head_oid, head) = self.head_commit()?;
        let split_oid = self.split_point(&head_oid, &given_oid)?;

        if split_oid == given_oid {
            writeln!(self.writer(), "{}", ANCESTOR_NOTICE)?;
            return Ok(());
        }

        let given = self.database().load_commit(&given_oid)?;
        guard_untracked(self.workspace(), &index, head.snapshot(), given.snapshot())?;

        if split_oid == head_oid {
            Migration::new(self, head.snapshot(), given.snapshot()).apply_changes()?;
            self.refs().move_branch(&current_branch, &given_oid)?;

            index.reset();
            index.write_updates()?;

            writeln!(self.writer(), "{}", FAST_FORWARD_NOTICE)?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let merge_result = ThreeWayMerge::new(split.snapshot(), head.snapshot(), given.snapshot())
            .resolve(
                |oid| Ok(self.database().parse_object_as_blob(oid)?.content().clone()),
                |blob| self.database().store(&blob),
            )?;

        Migration::new(self, head.snapshot(), &merge_result.snapshot).apply_changes()?;

        let message = format!("Merged {} into {}.", given_branch, current_branch);
        self.write_commit(
            (&head_oid, &head),
            Some((&given_oid, &given)),
            merge_result.snapshot.clone(),
            message,
        )?;

        index.reset();
        index.write_updates()?;

        if merge_result.has_conflicts() {
            tracing::info!(paths = ?merge_result.conflicts, "merge produced conflicts");
            writeln!(self.writer(), "{}", CONFLICT_NOTICE)?;
        }

        Ok(())
    }

    fn split_point(&self, head_oid: &ObjectId, given_oid: &ObjectId) -> anyhow::Result<ObjectId> {
        let commit_cache = CommitCache::new();
        let graph = self.database().commit_graph(&commit_cache);

        graph.split_point(head_oid, given_oid)
    }
}
