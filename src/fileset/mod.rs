//! Hiding and restoring drivers on disk.
//!
//! Drivers are moved as whole directories between the active drivers root
//! and a quarantine directory. Every operation checks all of its moves for
//! collisions before the first rename, and undoes completed renames if a
//! later one fails, so a driver is never left half-moved.
//!
//! [`DriverFileset`] does no locking of its own. Concurrent operations on
//! the same roots must be serialized by the caller, e.g. with
//! [`FilesetLock`].

mod lock;

pub use lock::FilesetLock;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{DriverError, Result};
use crate::ports::filesystem::FileSystem;
use crate::registry::driver_name;

/// The active drivers root paired with its quarantine.
pub struct DriverFileset<'a> {
    fs: &'a dyn FileSystem,
    active_root: PathBuf,
    quarantine_root: PathBuf,
}

impl<'a> DriverFileset<'a> {
    /// Creates a fileset over explicit roots.
    #[must_use]
    pub fn new(
        fs: &'a dyn FileSystem,
        active_root: impl Into<PathBuf>,
        quarantine_root: impl Into<PathBuf>,
    ) -> Self {
        Self { fs, active_root: active_root.into(), quarantine_root: quarantine_root.into() }
    }

    /// Creates a fileset over the roots named by `config`.
    #[must_use]
    pub fn from_config(fs: &'a dyn FileSystem, config: &Config) -> Self {
        Self::new(fs, config.drivers_root(), config.quarantine_root())
    }

    /// Entries currently in the active root.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] if the root exists but cannot be listed.
    pub fn active(&self) -> Result<Vec<String>> {
        self.children(&self.active_root)
    }

    /// Entries currently in quarantine.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Io`] if the quarantine exists but cannot be listed.
    pub fn quarantined(&self) -> Result<Vec<String>> {
        self.children(&self.quarantine_root)
    }

    /// Moves every active entry except `name` into quarantine.
    ///
    /// Returns the names that were moved.
    ///
    /// # Errors
    ///
    /// - [`DriverError::Validation`] if `name` is blank or not a single
    ///   plain directory name (see [`driver_name`]).
    /// - [`DriverError::NotFound`] if `name` is not in the active root.
    /// - [`DriverError::Collision`] if quarantine already holds one of the
    ///   entries to be moved; nothing is moved in that case.
    pub fn isolate(&self, name: &str) -> Result<Vec<String>> {
        let name = driver_name(name)?;
        if !self.fs.exists(&self.active_root.join(name)) {
            return Err(DriverError::NotFound(name.to_string()));
        }
        let others: Vec<String> =
            self.active()?.into_iter().filter(|entry| entry != name).collect();
        let moved = self.move_all(&others, &self.active_root, &self.quarantine_root)?;
        tracing::info!(driver = name, hidden = moved.len(), "isolated driver");
        Ok(moved)
    }

    /// Moves every active entry into quarantine.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Collision`] if quarantine already holds one of
    /// the entries; nothing is moved in that case.
    pub fn clear(&self) -> Result<Vec<String>> {
        let all = self.active()?;
        let moved = self.move_all(&all, &self.active_root, &self.quarantine_root)?;
        tracing::info!(hidden = moved.len(), "cleared drivers");
        Ok(moved)
    }

    /// Moves every quarantined entry back into the active root.
    ///
    /// An empty or missing quarantine is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Collision`] if the active root already holds an
    /// entry of the same name; nothing is moved in that case.
    pub fn restore(&self) -> Result<Vec<String>> {
        let all = self.quarantined()?;
        let moved = self.move_all(&all, &self.quarantine_root, &self.active_root)?;
        if !moved.is_empty() {
            tracing::info!(restored = moved.len(), "restored drivers");
        }
        Ok(moved)
    }

    fn children(&self, dir: &Path) -> Result<Vec<String>> {
        if !self.fs.is_dir(dir) {
            return Ok(Vec::new());
        }
        let names = self.fs.list_dir(dir).map_err(|e| DriverError::io(dir, e))?;
        Ok(names.into_iter().filter(|n| !n.starts_with('.')).collect())
    }

    fn move_all(&self, names: &[String], from: &Path, to: &Path) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(existing) = names.iter().find(|name| self.fs.exists(&to.join(name))) {
            return Err(DriverError::Collision(format!(
                "{} already exists",
                to.join(existing).display()
            )));
        }
        self.fs.create_dir_all(to).map_err(|e| DriverError::io(to, e))?;

        let mut moved: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let source = from.join(name);
            if let Err(e) = self.fs.rename(&source, &to.join(name)) {
                self.roll_back(&moved, from, to);
                return Err(DriverError::io(source, e));
            }
            tracing::debug!(entry = %name, to = %to.display(), "moved");
            moved.push(name.clone());
        }
        Ok(moved)
    }

    fn roll_back(&self, moved: &[String], from: &Path, to: &Path) {
        for name in moved.iter().rev() {
            if let Err(e) = self.fs.rename(&to.join(name), &from.join(name)) {
                tracing::error!(entry = %name, error = %e, "failed to roll back move");
            }
        }
    }
}
