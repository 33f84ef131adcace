//! Advisory lock serializing fileset operations on one application.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{DriverError, Result};

/// Exclusive advisory lock held for the lifetime of the value.
#[derive(Debug)]
pub struct FilesetLock {
    file: File,
    path: PathBuf,
}

impl FilesetLock {
    /// Takes the lock at `path` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Collision`] if another process holds the lock
    /// and [`DriverError::Io`] if the lock file cannot be created.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DriverError::io(parent, e.into()))?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| DriverError::io(&path, e.into()))?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                return Err(DriverError::Collision(format!(
                    "another driver operation holds {}",
                    path.display()
                )));
            }
            return Err(DriverError::io(&path, e.into()));
        }
        tracing::debug!(path = %path.display(), "acquired fileset lock");
        Ok(Self { file, path })
    }

    /// Location of the lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FilesetLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
