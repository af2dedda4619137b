//! Branch pointers and HEAD
//!
//! Branches are mutable pointers to commits. Each lives in its own file under
//! `.gitlet/refs/heads/`, holding a 40-character commit ID. Names may be hierarchical
//! (`origin/master`), which maps to nested directories.
//!
//! HEAD names the checked-out branch and is always symbolic:
//!
//! ```text
//! ref: refs/heads/master
//! ```
//!
//! Every operation moves at most one branch, and always after the commit it points to has
//! been written, so a branch never points at a missing object.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::errors::{InvariantViolation, UserError};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch pointer store over one metadata directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    /// Name of the checked-out branch
    pub fn current_branch_name(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref = regex::Regex::new(SYMREF_REGEX)?
            .captures(content.trim())
            .map(|captures| captures[1].to_string())
            .with_context(|| format!("HEAD is not a symbolic ref: {}", content.trim()))?;

        BranchName::try_parse_ref_path(&symref)
    }

    pub fn set_current_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(
            &self.head_path(),
            format!("ref: {}", name.to_ref_path()),
        )?;
        tracing::debug!(branch = %name, "moved HEAD");

        Ok(())
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch_name()? == name)
    }

    /// Commit ID a branch points to, if the branch exists
    pub fn resolve(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(name.to_path());
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Err(InvariantViolation::DanglingBranch(name.to_string()).into());
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// Commit ID of the checked-out branch
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current = self.current_branch_name()?;

        self.resolve(&current)?
            .ok_or_else(|| InvariantViolation::DanglingBranch(current.to_string()).into())
    }

    pub fn create_branch(&self, name: &BranchName, target: &ObjectId) -> anyhow::Result<()> {
        if self.resolve(name)?.is_some() {
            return Err(UserError::BranchAlreadyExists.into());
        }

        self.move_branch(name, target)
    }

    /// Fail when `name` needs a path another branch already occupies
    ///
    /// `a` and `a/b` cannot coexist: one is a file where the other needs a directory.
    pub fn ensure_name_available(&self, name: &BranchName) -> anyhow::Result<()> {
        let heads_path = self.heads_path();
        let branch_path = heads_path.join(name.to_path());

        let blocked_by_prefix = branch_path
            .ancestors()
            .skip(1)
            .take_while(|ancestor| *ancestor != &*heads_path)
            .any(Path::is_file);

        if blocked_by_prefix || branch_path.is_dir() {
            return Err(UserError::InvalidBranchName(name.to_string()).into());
        }

        Ok(())
    }

    /// Point a branch at `target`, creating it if needed
    pub fn move_branch(&self, name: &BranchName, target: &ObjectId) -> anyhow::Result<()> {
        self.ensure_name_available(name)?;

        let branch_path = self.heads_path().join(name.to_path());
        self.update_ref_file(&branch_path, target.to_string())?;
        tracing::debug!(branch = %name, oid = %target, "moved branch");

        Ok(())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self.resolve(name)?.ok_or(UserError::NoSuchBranch)?;
        if self.is_current_branch(name)? {
            return Err(UserError::CannotRemoveCurrentBranch.into());
        }

        let branch_path = self.heads_path().join(name.to_path());
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %name, "deleted branch");

        Ok(oid)
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path)?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;
        lock.deref_mut().write_all(b"\n")?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != &*self.heads_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
