use crate::GITLET_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [GITLET_DIR];

/// The working tree: plain files under the repository root, minus the metadata directory
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file in the work tree, relative to its root
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<PathBuf>> {
        Ok(WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.file_name().to_string_lossy().as_ref()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect())
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    /// Turn a command-line file operand into the key the index and snapshots use
    ///
    /// `.` components are dropped and `..` is resolved lexically. Absolute operands must lie
    /// under the work tree. `None` when the operand names the work tree itself, leaves it,
    /// or points into the metadata directory.
    pub fn relative_path(&self, operand: &str) -> Option<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(operand).components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return None;
                    }
                }
                other => normalized.push(other),
            }
        }

        let relative = if normalized.is_absolute() {
            normalized.strip_prefix(&self.path).ok()?.to_path_buf()
        } else {
            normalized
        };

        let first = relative.components().next()?;
        if Self::is_ignored(first.as_os_str().to_string_lossy().as_ref()) {
            return None;
        }

        Some(relative)
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directories for {:?}", file_path)
            })?;
        }

        // a directory standing where the file goes is replaced
        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Delete a file if present, then prune directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        let mut parent = file_path.parent();
        while let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
            let full_dir = self.path.join(dir);
            if !full_dir.is_dir() || full_dir.read_dir()?.next().is_some() {
                break;
            }
            std::fs::remove_dir(&full_dir)
                .with_context(|| format!("Failed to remove directory: {:?}", dir))?;
            parent = dir.parent();
        }

        Ok(())
    }

    // Deletions run first so a file can replace a directory emptied by them
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Modify, ActionType::Add] {
            self.apply_migration_action_set(migration, action)?;
        }

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        for (file_path, oid) in migration.actions_of(action) {
            match (action, oid) {
                (ActionType::Delete, None) => self.remove_file(file_path)?,
                (ActionType::Add | ActionType::Modify, Some(oid)) => {
                    let data = migration.load_blob_data(oid)?;
                    self.write_file(file_path, &data)?;
                }
                _ => anyhow::bail!("Invalid action and entry combination"),
            }
        }

        Ok(())
    }
}
