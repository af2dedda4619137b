use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// History of HEAD along main parents, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_oid = self.refs().read_head()?;
        let cache = CommitCache::new();
        let graph = self.database().commit_graph(&cache);

        for slim in graph.walk_main_parents(&head_oid) {
            let slim = slim?;
            let commit = self.database().load_commit(&slim.oid)?;
            self.display_commit(&slim.oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the object store, in digest order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for oid in self.database().list_commits()? {
            let commit = self.database().load_commit(&oid)?;
            self.display_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// IDs of all commits with exactly this message
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut found = false;
        for oid in self.database().list_commits()? {
            if self.database().load_commit(&oid)?.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            return Err(UserError::NoCommitWithMessage.into());
        }

        Ok(())
    }

    fn display_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "{}", format!("commit {}", oid).yellow())?;

        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }

        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
