//! Identifiers persisted on disk.
//!
//! A [`PersistentId`] is a UUID stored in a small text file. It is read if
//! present and valid, otherwise generated and written back. If the file
//! cannot be written the generated value is still returned, so the
//! identifier is stable only as long as the file system cooperates.

mod advertising;

pub use advertising::FileAdvertisingId;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Errors from identifier storage.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Reading or writing the identifier file failed.
    #[error("Failed to access identifier file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A UUID persisted in a file.
#[derive(Debug, Clone)]
pub struct PersistentId {
    path: PathBuf,
}

impl PersistentId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored identifier, if the file holds a valid one.
    pub fn load(&self) -> Option<Uuid> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match Uuid::parse_str(contents.trim()) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Ignoring malformed identifier file");
                None
            }
        }
    }

    /// Read the stored identifier or create and persist a new one.
    ///
    /// A write failure is logged and the fresh identifier is returned anyway.
    pub fn load_or_create(&self) -> Uuid {
        if let Some(id) = self.load() {
            return id;
        }

        let id = Uuid::new_v4();
        if let Err(e) = self.store(id) {
            warn!(error = %e, "Identifier will not survive a restart");
        }
        id
    }

    /// Replace the stored identifier with a new one.
    pub fn regenerate(&self) -> Result<Uuid, IdentityError> {
        let id = Uuid::new_v4();
        self.store(id)?;
        Ok(id)
    }

    fn store(&self, id: Uuid) -> Result<(), IdentityError> {
        let io_err = |source| IdentityError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, id.to_string()).map_err(io_err)
    }
}
