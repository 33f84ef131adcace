//! Splices driver subtrees into a [`PathSet`].

use std::path::PathBuf;

use super::{PathSet, ResourceCategory};
use crate::error::Result;
use crate::registry::{driver_name, Driver};

/// How drivers are installed into the path set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallMode {
    /// Append every driver's subpaths after the existing entries.
    MergeAll,
    /// Make one driver's subtree stand in for the application's own.
    ReplaceWithSingle(String),
}

/// Installs driver paths relative to a drivers root.
#[derive(Debug, Clone)]
pub struct PathInstaller {
    drivers_root: PathBuf,
}

impl PathInstaller {
    /// Creates an installer for drivers living under `drivers_root`.
    #[must_use]
    pub fn new(drivers_root: impl Into<PathBuf>) -> Self {
        Self { drivers_root: drivers_root.into() }
    }

    /// Installs `drivers` into `paths` according to `mode`.
    ///
    /// The drivers root is added to the code search path once so drivers can
    /// reference each other. In [`InstallMode::ReplaceWithSingle`] the
    /// `drivers` slice is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Validation`](crate::error::DriverError::Validation)
    /// if the single driver's name is not a plain directory name; `paths` is
    /// left untouched in that case.
    pub fn install(
        &self,
        drivers: &[Driver],
        paths: &mut PathSet,
        mode: &InstallMode,
    ) -> Result<()> {
        if let InstallMode::ReplaceWithSingle(name) = mode {
            driver_name(name)?;
        }
        paths.push_autoload(self.drivers_root.clone());

        match mode {
            InstallMode::MergeAll => {
                for driver in drivers {
                    for category in ResourceCategory::ALL {
                        paths.push(category, driver.join(category.subpath()));
                    }
                    paths.push_autoload(driver.join(ResourceCategory::Lib.subpath()));
                    tracing::debug!(driver = %driver.name, "installed driver paths");
                }
            }
            InstallMode::ReplaceWithSingle(name) => {
                let driver_root = self.drivers_root.join(name.trim());
                for category in ResourceCategory::ALL {
                    paths.replace(category, vec![driver_root.join(category.subpath())]);
                }
                paths.push_autoload(driver_root.join(ResourceCategory::Lib.subpath()));
                tracing::debug!(driver = %name, "replaced application paths with driver");
            }
        }
        Ok(())
    }
}
