//! Ancestry and split-point queries
//!
//! The graph never touches storage directly. It is parameterized by a loader that turns a
//! commit ID into a [`SlimCommit`], so the same code runs over the on-disk database (through
//! its commit cache) and over the in-memory stores used in tests.
//!
//! ## Split point
//!
//! The split point is found with a deliberately narrow heuristic: take the older of the two
//! commits, then walk its *main-parent* chain and return the first commit that is an
//! ancestor of the newer one (through both parents). With criss-cross merges this can pick
//! a common ancestor that is valid but not the latest one. Merge results depend on this
//! exact choice, so it is kept as is.
//!
//! ## Timestamps
//!
//! Commit timestamps never decrease along parent edges, so a commit strictly older than a
//! candidate cannot have the candidate among its ancestors. Ancestry walks use that to
//! prune, never as the answer itself.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

pub struct CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    fn load(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        (self.commit_loader)(oid)
    }

    /// Check whether `candidate` is an ancestor of `of`
    ///
    /// A commit is its own ancestor, and the root commit is an ancestor of everything.
    /// Otherwise walk back from `of` through main parents, and through second parents
    /// too when `include_merge_parents` is set.
    pub fn is_ancestor(
        &self,
        candidate: &ObjectId,
        of: &ObjectId,
        include_merge_parents: bool,
    ) -> anyhow::Result<bool> {
        if candidate == of {
            return Ok(true);
        }

        let candidate = self.load(candidate)?;
        if candidate.is_root() {
            return Ok(true);
        }

        let mut visited = HashSet::new();
        let mut pending = vec![of.clone()];

        while let Some(oid) = pending.pop() {
            if oid == candidate.oid {
                return Ok(true);
            }
            if !visited.insert(oid.clone()) {
                continue;
            }

            let commit = self.load(&oid)?;
            if commit.is_root() || commit.timestamp < candidate.timestamp {
                continue;
            }

            let parents = if include_merge_parents {
                &commit.parents[..]
            } else {
                &commit.parents[..1]
            };
            pending.extend(parents.iter().cloned());
        }

        Ok(false)
    }

    /// Common ancestor used as the base of a three-way merge
    ///
    /// On equal timestamps `b` counts as the older commit.
    pub fn split_point(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<ObjectId> {
        let a = self.load(a)?;
        let b = self.load(b)?;
        let (older, newer) = if a.timestamp < b.timestamp {
            (a, b)
        } else {
            (b, a)
        };

        let mut cursor = older;
        loop {
            if self.is_ancestor(&cursor.oid, &newer.oid, true)? {
                tracing::debug!(split = %cursor.oid, "found split point");
                return Ok(cursor.oid);
            }

            match cursor.main_parent() {
                Some(parent) => cursor = self.load(parent)?,
                None => return Ok(cursor.oid),
            }
        }
    }

    /// Lazily walk from `start` to the root along main-parent edges
    pub fn walk_main_parents(&self, start: &ObjectId) -> MainParents<'_, CommitLoaderFn> {
        MainParents {
            graph: self,
            next: Some(start.clone()),
        }
    }

    /// Commits reachable from `head` (both parent edges) that `is_present` rejects
    ///
    /// The walk does not descend past present commits. The result lists parents before
    /// children, so copying in order keeps the destination closed under parent edges.
    pub fn missing_ancestry(
        &self,
        head: &ObjectId,
        is_present: impl Fn(&ObjectId) -> bool,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut ordered = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![(head.clone(), false)];

        while let Some((oid, expanded)) = pending.pop() {
            if expanded {
                ordered.push(oid);
                continue;
            }
            if is_present(&oid) || !seen.insert(oid.clone()) {
                continue;
            }

            let commit = self.load(&oid)?;
            pending.push((oid, true));
            // reversed so the main parent's history comes out first
            for parent in commit.parents.iter().rev() {
                pending.push((parent.clone(), false));
            }
        }

        Ok(ordered)
    }
}

/// Iterator returned by [`CommitGraph::walk_main_parents`]
pub struct MainParents<'g, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    graph: &'g CommitGraph<CommitLoaderFn>,
    next: Option<ObjectId>,
}

impl<CommitLoaderFn> Iterator for MainParents<'_, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    type Item = anyhow::Result<SlimCommit>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        match self.graph.load(&oid) {
            Ok(commit) => {
                self.next = commit.main_parent().cloned();
                Some(Ok(commit))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
