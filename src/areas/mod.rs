//! Persistent stores of a repository
//!
//! - `database`: content-addressed blobs and commits
//! - `index`: the staging area
//! - `refs`: branches and HEAD
//! - `remotes`: named locations of other repositories
//! - `repository`: the handle owning all of the above for one work tree
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod remotes;
pub mod repository;
pub mod workspace;
