//! Command implementations
//!
//! All verbs live under `porcelain`; the binary only parses arguments and dispatches.

pub mod porcelain;
