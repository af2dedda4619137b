use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::core::errors::UserError;
use std::path::Path;

/// Object and ref stores of another repository, opened by its metadata directory
#[derive(Debug)]
pub struct RemoteStore {
    path: Box<Path>,
    database: Database,
    refs: Refs,
}

impl RemoteStore {
    pub fn open(location: &Path) -> anyhow::Result<Self> {
        if !location.is_dir() {
            return Err(UserError::RemoteDirectoryNotFound.into());
        }

        Ok(RemoteStore {
            path: location.to_path_buf().into_boxed_path(),
            database: Database::new(location.join("objects").into_boxed_path()),
            refs: Refs::new(location.to_path_buf().into_boxed_path()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
