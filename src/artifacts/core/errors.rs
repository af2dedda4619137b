//! Error types
//!
//! Everything propagates as `anyhow::Error`. Two typed enums ride inside it:
//!
//! - [`UserError`]: an expected abort with a fixed message, reported to the user as-is
//! - [`InvariantViolation`]: an internal inconsistency in the stores, fatal if it surfaces
//!
//! The binary downcasts to tell them apart.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Please enter a command.")]
    MissingCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileDoesNotExist,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NoChanges,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("No such branch exists.")]
    NoSuchBranchToCheckout,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithItself,
    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,
    #[error("Remote directory not found.")]
    RemoteDirectoryNotFound,
    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,
    #[error("Please pull down remote changes before pushing.")]
    RemoteAhead,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("object {0} is missing from the object store")]
    MissingObject(ObjectId),
    #[error("object {0} is not a commit")]
    NotACommit(ObjectId),
    #[error("object {expected} hashes to {actual}")]
    DigestMismatch { expected: ObjectId, actual: ObjectId },
    #[error("branch {0} points at nothing")]
    DanglingBranch(String),
}
