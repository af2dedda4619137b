//! Working tree status inspection
//!
//! Compares the work tree against HEAD and the staging area.
//!
//! - `file_change`: kinds of unstaged modification
//! - `inspector`: detection of unstaged changes and untracked files
//! - `status_info`: the report printed by `status`

pub mod file_change;
pub mod inspector;
pub mod status_info;
