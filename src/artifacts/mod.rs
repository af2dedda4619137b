//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch name validation
//! - `checkout`: Snapshot migrations and the untracked-file guard
//! - `core`: Error types and shared utilities (pager wrapper)
//! - `graph`: Commit graph traversal (ancestry, split point, history walk)
//! - `index`: Staging file format
//! - `merge`: Three-way merge classification and conflict materialization
//! - `objects`: Object types (blob, commit)
//! - `remote`: Remote stores and replication
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod graph;
pub mod index;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod status;
