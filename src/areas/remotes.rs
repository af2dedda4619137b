//! Named remotes
//!
//! The `.gitlet/remotes` file maps remote names to the location of another repository's
//! metadata directory, in git-config style:
//!
//! ```text
//! [remote "origin"]
//! 	path = ../other/.gitlet
//! ```

use crate::artifacts::core::errors::UserError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const SECTION_REGEX: &str = r#"^\[remote "([^"]+)"\]$"#;
const PATH_REGEX: &str = r"^path\s*=\s*(.+)$";

#[derive(Debug)]
pub struct Remotes {
    /// Path to the remotes file
    path: Box<Path>,
    /// Directory relative remote locations resolve against
    work_tree: Box<Path>,
}

impl Remotes {
    pub fn new(path: Box<Path>, work_tree: Box<Path>) -> Self {
        Remotes { path, work_tree }
    }

    /// Register `location` under `name`
    ///
    /// `/` separators are converted to the platform's, and the path is kept as written.
    pub fn add(&self, name: &str, location: &str) -> anyhow::Result<()> {
        let mut remotes = self.load()?;
        if remotes.contains_key(name) {
            return Err(UserError::RemoteAlreadyExists.into());
        }

        let location = location.replace('/', std::path::MAIN_SEPARATOR_STR);
        remotes.insert(name.to_string(), PathBuf::from(location));
        self.save(&remotes)?;
        tracing::debug!(remote = name, "added remote");

        Ok(())
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let mut remotes = self.load()?;
        if remotes.remove(name).is_none() {
            return Err(UserError::NoSuchRemote.into());
        }

        self.save(&remotes)?;
        tracing::debug!(remote = name, "removed remote");

        Ok(())
    }

    /// Location of a remote's metadata directory, resolved against the work tree
    pub fn get(&self, name: &str) -> anyhow::Result<PathBuf> {
        let location = self
            .load()?
            .remove(name)
            .ok_or(UserError::NoSuchRemote)?;

        Ok(self.work_tree.join(location))
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read remotes at {:?}", self.path))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        let section = regex::Regex::new(SECTION_REGEX)?;
        let path = regex::Regex::new(PATH_REGEX)?;

        let mut remotes = BTreeMap::new();
        let mut current = None;

        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(captures) = section.captures(line) {
                current = Some(captures[1].to_string());
            } else if let Some(captures) = path.captures(line) {
                let name = current
                    .take()
                    .with_context(|| format!("remote path outside a section: {}", line))?;
                remotes.insert(name, PathBuf::from(captures[1].trim()));
            } else {
                anyhow::bail!("malformed remotes line: {}", line);
            }
        }

        Ok(remotes)
    }

    fn save(&self, remotes: &BTreeMap<String, PathBuf>) -> anyhow::Result<()> {
        let content = remotes
            .iter()
            .map(|(name, location)| {
                format!("[remote \"{}\"]\n\tpath = {}\n", name, location.display())
            })
            .collect::<String>();

        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write remotes at {:?}", self.path))
    }
}
