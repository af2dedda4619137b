//! Porcelain commands (user-facing verbs)
//!
//! Each verb is an `impl Repository` block. Verbs validate before they mutate anything,
//! and write new objects before moving the branch that will reference them.
//!
//! ## Commands
//!
//! - `init`: Create the `.gitlet` layout with the shared root commit
//! - `add`, `rm`: Stage and unstage files
//! - `commit`: Record the staged snapshot
//! - `log`: `log`, `global-log` and `find`
//! - `status`: Branches, staged files and work-tree changes
//! - `checkout`: Restore files or switch branches
//! - `branch`: Create and delete branches
//! - `reset`: Move the current branch to any commit
//! - `merge`: Three-way merge of another branch
//! - `remote`: Remotes, `push`, `fetch` and `pull`

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
