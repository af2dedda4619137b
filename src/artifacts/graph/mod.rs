//! Commit graph traversal
//!
//! Read-only queries over commits already in an object store: ancestry, the merge
//! split point, the main-parent history walk used by `log`, and the missing-ancestry
//! closure used by replication.

pub mod commit_graph;
