//! Object types and operations
//!
//! All content is stored as objects identified by SHA-1 hashes. There are two types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot (path to blob mapping) with timestamp, message and parent(s)
//!
//! All objects implement serialization/deserialization for the framed object format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
