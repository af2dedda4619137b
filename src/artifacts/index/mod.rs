//! Staging file format
//!
//! The staging area persists to `.gitlet/index` in a small binary format modelled on
//! git's index, reduced to what staging needs: no stat data, just the pending additions
//! and removals.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "GLIX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Blob ID, all zeroes for removals (20 bytes)
//!   - Flags: removal bit and path length (2 bytes)
//!   - Path, NUL padded to 8-byte alignment
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "GLIX";

/// Index file format version
pub const VERSION: u32 = 1;
