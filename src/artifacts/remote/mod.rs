//! Replication between two repositories on the same filesystem
//!
//! - `remote_store`: handle over another repository's `.gitlet` directory
//! - `replicator`: copies commit closures and their blobs from one store to another

pub mod remote_store;
pub mod replicator;
