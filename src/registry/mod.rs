//! Driver discovery.
//!
//! A driver is any immediate subdirectory of the drivers root. The registry
//! scans the root once per bootstrap and hands out [`Driver`] values in
//! discovery order.

mod loaded;

pub use loaded::{FrozenDrivers, LoadedDrivers};

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{DriverError, Result};
use crate::ports::filesystem::FileSystem;

/// A self-contained feature directory under the drivers root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Driver {
    /// Directory base name; unique among active drivers.
    pub name: String,
    /// Path of the driver directory.
    pub root_path: PathBuf,
}

impl Driver {
    /// Path of `subpath` inside this driver.
    #[must_use]
    pub fn join(&self, subpath: impl AsRef<Path>) -> PathBuf {
        self.root_path.join(subpath)
    }
}

/// Trims an operator-supplied driver name and checks that it names a single
/// visible directory directly under the drivers root.
///
/// # Errors
///
/// Returns [`DriverError::Validation`] for a blank name and for anything
/// else that is not one plain path component (`..`, `.`, `a/b`, `.cache`).
pub fn driver_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DriverError::Validation("No driver specified".into()));
    }
    let mut components = Path::new(name).components();
    let single =
        matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
    if !single || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(DriverError::Validation(format!("invalid driver name {name:?}")));
    }
    Ok(name)
}

/// What a scan does when the drivers root does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRoot {
    /// Treat a missing root as "no drivers yet".
    Tolerate,
    /// Fail with [`DriverError::Configuration`].
    Require,
}

/// Scans a drivers root through the filesystem port.
pub struct DriverRegistry<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
}

impl<'a> DriverRegistry<'a> {
    /// Creates a registry over `root`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, root: impl Into<PathBuf>) -> Self {
        Self { fs, root: root.into() }
    }

    /// The scanned root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists the drivers under the root in the port's enumeration order.
    ///
    /// Plain files and hidden entries (`.keep`, `.DS_Store`) are not drivers.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Configuration`] if the root is missing and
    /// `missing` is [`MissingRoot::Require`], or if the root is not a
    /// directory. Listing failures surface as [`DriverError::Io`].
    pub fn list_drivers(&self, missing: MissingRoot) -> Result<Vec<Driver>> {
        if !self.fs.exists(&self.root) {
            return match missing {
                MissingRoot::Tolerate => {
                    tracing::debug!(
                        root = %self.root.display(),
                        "drivers root missing, no drivers"
                    );
                    Ok(Vec::new())
                }
                MissingRoot::Require => Err(DriverError::Configuration(format!(
                    "drivers root {} does not exist",
                    self.root.display()
                ))),
            };
        }
        if !self.fs.is_dir(&self.root) {
            return Err(DriverError::Configuration(format!(
                "drivers root {} is not a directory",
                self.root.display()
            )));
        }

        let names = self.fs.list_dir(&self.root).map_err(|e| DriverError::io(&self.root, e))?;
        let drivers: Vec<Driver> = names
            .into_iter()
            .filter(|name| !name.starts_with('.'))
            .map(|name| Driver { root_path: self.root.join(&name), name })
            .filter(|driver| self.fs.is_dir(&driver.root_path))
            .collect();

        tracing::debug!(
            root = %self.root.display(),
            count = drivers.len(),
            "scanned drivers"
        );
        Ok(drivers)
    }

    /// Looks up a single active driver by name.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Validation`] for a name rejected by
    /// [`driver_name`] and [`DriverError::NotFound`] if no such directory
    /// exists.
    pub fn find(&self, name: &str) -> Result<Driver> {
        let name = driver_name(name)?;
        let root_path = self.root.join(name);
        if !self.fs.is_dir(&root_path) {
            return Err(DriverError::NotFound(name.to_string()));
        }
        Ok(Driver { name: name.to_string(), root_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    fn make_root(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::create_dir_all(dir.path().join("drivers").join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn lists_subdirectories_in_sorted_order() {
        let dir = make_root(&["store", "admin", "billing"]);
        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));
        let drivers = registry.list_drivers(MissingRoot::Require).unwrap();

        let names: Vec<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["admin", "billing", "store"]);
        assert_eq!(drivers[0].root_path, dir.path().join("drivers/admin"));
    }

    #[test]
    fn skips_files_and_hidden_entries() {
        let dir = make_root(&["store"]);
        std::fs::write(dir.path().join("drivers/README.md"), "").unwrap();
        std::fs::write(dir.path().join("drivers/.keep"), "").unwrap();
        std::fs::create_dir(dir.path().join("drivers/.cache")).unwrap();

        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));
        let drivers = registry.list_drivers(MissingRoot::Require).unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].name, "store");
    }

    #[test]
    fn missing_root_is_empty_when_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));
        assert!(registry.list_drivers(MissingRoot::Tolerate).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_configuration_error_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));
        let err = registry.list_drivers(MissingRoot::Require).unwrap_err();
        assert!(matches!(err, DriverError::Configuration(_)));
    }

    #[test]
    fn root_that_is_a_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("drivers"), "").unwrap();
        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));
        let err = registry.list_drivers(MissingRoot::Tolerate).unwrap_err();
        assert!(matches!(err, DriverError::Configuration(_)));
    }

    #[test]
    fn find_validates_and_reports_missing() {
        let dir = make_root(&["store"]);
        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));

        assert_eq!(registry.find("store").unwrap().name, "store");
        assert!(matches!(registry.find(""), Err(DriverError::Validation(_))));
        assert!(matches!(registry.find("admin"), Err(DriverError::NotFound(_))));
    }

    #[test]
    fn driver_names_must_be_one_plain_component() {
        assert_eq!(driver_name("  store ").unwrap(), "store");
        let bad_names =
            ["", "   ", ".", "..", "alpha/app", "alpha/", "../alpha", "/alpha", ".cache", "a\\b"];
        for bad in bad_names {
            assert!(matches!(driver_name(bad), Err(DriverError::Validation(_))), "{bad:?}");
        }
    }

    #[test]
    fn find_rejects_path_like_names() {
        let dir = make_root(&["store"]);
        std::fs::create_dir_all(dir.path().join("drivers/store/app")).unwrap();
        let registry = DriverRegistry::new(&LiveFileSystem, dir.path().join("drivers"));

        for bad in ["..", ".", "store/app"] {
            assert!(matches!(registry.find(bad), Err(DriverError::Validation(_))), "{bad:?}");
        }
        assert_eq!(registry.find(" store ").unwrap().root_path, dir.path().join("drivers/store"));
    }
}
