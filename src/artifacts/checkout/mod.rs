//! Moving the work tree between snapshots
//!
//! Used by `checkout <branch>`, `reset` and fast-forward merges. Every move is checked by
//! the untracked-file guard first, so a refused move leaves the work tree untouched.

pub mod migration;
pub mod untracked;
