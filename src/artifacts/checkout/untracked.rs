use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::errors::UserError;
use crate::artifacts::objects::commit::Snapshot;
use std::path::PathBuf;

/// Work-tree files that moving to `target` would overwrite although the next commit would
/// not record them
///
/// A file HEAD tracks but the index stages for removal counts as untracked once it is back
/// in the work tree, the same way `status` lists it.
pub fn untracked_in_the_way(
    workspace: &Workspace,
    index: &Index,
    head: &Snapshot,
    target: &Snapshot,
) -> Vec<PathBuf> {
    target
        .keys()
        .filter(|path| !head.contains_key(*path) || index.is_staged_for_removal(path))
        .filter(|path| workspace.file_exists(path))
        .cloned()
        .collect()
}

/// Fail before any mutation when an untracked file would be clobbered
pub fn guard_untracked(
    workspace: &Workspace,
    index: &Index,
    head: &Snapshot,
    target: &Snapshot,
) -> anyhow::Result<()> {
    let in_the_way = untracked_in_the_way(workspace, index, head, target);

    if !in_the_way.is_empty() {
        tracing::debug!(paths = ?in_the_way, "untracked files block the checkout");
        return Err(UserError::UntrackedFileInTheWay.into());
    }

    Ok(())
}
