//! A local, single-user version-control engine.
//!
//! Content-addressed blobs and commits live in an object store; named branch pointers and
//! a staging area sit on top of it; merges reconcile three snapshots; and push/fetch copy
//! history between two stores reachable through the filesystem.

pub mod areas;
pub mod artifacts;
pub mod commands;

/// Name of the repository metadata directory inside the work tree
pub const GITLET_DIR: &str = ".gitlet";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
