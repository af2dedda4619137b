use crate::artifacts::branch::{HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX};
use crate::artifacts::core::errors::UserError;
use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || re.is_match(&name) {
            Err(UserError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Name of the local branch that mirrors `branch` of `remote`
    pub fn remote_tracking(remote: &str, branch: &BranchName) -> anyhow::Result<Self> {
        Self::try_parse(format!("{remote}/{branch}"))
    }

    /// Parse the target of a `ref: refs/heads/<name>` record
    pub fn try_parse_ref_path(ref_path: &str) -> anyhow::Result<Self> {
        let name = ref_path.strip_prefix(HEADS_PREFIX).with_context(|| {
            format!("symbolic ref must start with '{HEADS_PREFIX}', got '{ref_path}'")
        })?;

        Self::try_parse(name.to_string())
    }

    pub fn to_ref_path(&self) -> String {
        format!("{HEADS_PREFIX}{}", self.0)
    }

    /// Relative file path of the branch record under `refs/heads`
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
