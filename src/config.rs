//! Process configuration.
//!
//! A [`Config`] is assembled once, before bootstrap, from (lowest to highest
//! precedence) built-in defaults, `<app_root>/config/drivers.yml`, the
//! environment and CLI flags. It is then passed by reference to everything
//! that needs it; nothing reads ambient global state after that point.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, Result};
use crate::mixin::Namespacing;
use crate::paths::InstallMode;
use crate::ports::filesystem::FileSystem;

/// Default drivers directory, relative to the application root.
pub const DEFAULT_DRIVERS_PATH: &str = "drivers";

/// Default quarantine directory, relative to the application root.
pub const DEFAULT_QUARANTINE_PATH: &str = "tmp/drivers";

/// Lock file name, created in the quarantine root's parent directory.
pub const LOCK_FILE: &str = "drivers.lock";

/// Optional config file, relative to the application root.
pub const CONFIG_FILE: &str = "config/drivers.yml";

/// Overrides `drivers_path`.
pub const DRIVERS_PATH_ENV: &str = "DRIVERKIT_DRIVERS_PATH";

/// Names the single driver the process is scoped to.
pub const SCOPED_DRIVER_ENV: &str = "DRIVERKIT_SCOPED_DRIVER";

/// Settings shared by the registry, installer, mixer and fileset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Drivers directory, relative to `app_root` unless absolute.
    pub drivers_path: PathBuf,
    /// Where hidden drivers are parked, relative to `app_root` unless absolute.
    pub quarantine_path: PathBuf,
    /// How extension/override module names are qualified.
    pub namespacing: Namespacing,
    /// File extension of extension/override source files.
    pub source_extension: String,
    /// Application root every relative path is resolved against.
    #[serde(skip)]
    pub app_root: PathBuf,
    /// When set, paths are replaced by this single driver's subtree.
    #[serde(skip)]
    pub scoped_driver: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drivers_path: PathBuf::from(DEFAULT_DRIVERS_PATH),
            quarantine_path: PathBuf::from(DEFAULT_QUARANTINE_PATH),
            namespacing: Namespacing::default(),
            source_extension: "rb".to_string(),
            app_root: PathBuf::from("."),
            scoped_driver: None,
        }
    }
}

impl Config {
    /// Creates a default config rooted at `app_root`.
    #[must_use]
    pub fn new(app_root: impl Into<PathBuf>) -> Self {
        Self { app_root: app_root.into(), ..Self::default() }
    }

    /// Loads `<app_root>/config/drivers.yml` if present, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] if the file exists but cannot be read
    /// or parsed.
    pub fn load(fs: &dyn FileSystem, app_root: &Path) -> Result<Self> {
        let path = app_root.join(CONFIG_FILE);
        if !fs.exists(&path) {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new(app_root));
        }
        let contents = fs
            .read_to_string(&path)
            .map_err(|e| DriverError::Config { path: path.clone(), message: e.to_string() })?;
        let mut config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| DriverError::Config { path: path.clone(), message: e.to_string() })?
        };
        config.app_root = app_root.to_path_buf();
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(DRIVERS_PATH_ENV).filter(|v| !v.is_empty()) {
            self.drivers_path = PathBuf::from(path);
        }
        if let Some(driver) = lookup(SCOPED_DRIVER_ENV).filter(|v| !v.is_empty()) {
            self.scoped_driver = Some(driver);
        }
        self
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// Absolute (or app-relative) drivers root.
    #[must_use]
    pub fn drivers_root(&self) -> PathBuf {
        self.app_root.join(&self.drivers_path)
    }

    /// Absolute (or app-relative) quarantine root.
    #[must_use]
    pub fn quarantine_root(&self) -> PathBuf {
        self.app_root.join(&self.quarantine_path)
    }

    /// Lock file serializing fileset operations, in the quarantine root's parent.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        let quarantine = self.quarantine_root();
        quarantine.parent().map_or_else(|| PathBuf::from(LOCK_FILE), |dir| dir.join(LOCK_FILE))
    }

    /// Applies a `--drivers-path` flag, which wins over file and environment.
    #[must_use]
    pub fn with_drivers_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.drivers_path = path;
        }
        self
    }

    /// The install mode implied by `scoped_driver`.
    #[must_use]
    pub fn install_mode(&self) -> InstallMode {
        match &self.scoped_driver {
            Some(name) => InstallMode::ReplaceWithSingle(name.clone()),
            None => InstallMode::MergeAll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    #[test]
    fn defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&LiveFileSystem, dir.path()).unwrap();
        assert_eq!(config.drivers_path, PathBuf::from("drivers"));
        assert_eq!(config.drivers_root(), dir.path().join("drivers"));
        assert_eq!(config.quarantine_root(), dir.path().join("tmp/drivers"));
        assert_eq!(config.install_mode(), InstallMode::MergeAll);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "drivers_path: components\nnamespacing: global\n",
        )
        .unwrap();

        let config = Config::load(&LiveFileSystem, dir.path()).unwrap();
        assert_eq!(config.drivers_root(), dir.path().join("components"));
        assert_eq!(config.namespacing, Namespacing::Global);
        assert_eq!(config.source_extension, "rb");
        assert_eq!(config.app_root, dir.path());
    }

    #[test]
    fn malformed_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "drivers_pth: oops\n").unwrap();

        let err = Config::load(&LiveFileSystem, dir.path()).unwrap_err();
        assert!(matches!(err, DriverError::Config { .. }));
    }

    #[test]
    fn environment_overrides_file() {
        let config = Config::new("/app").with_env(|key| match key {
            DRIVERS_PATH_ENV => Some("engines".into()),
            SCOPED_DRIVER_ENV => Some("billing".into()),
            _ => None,
        });
        assert_eq!(config.drivers_root(), PathBuf::from("/app/engines"));
        assert_eq!(config.install_mode(), InstallMode::ReplaceWithSingle("billing".into()));
    }

    #[test]
    fn flag_overrides_environment() {
        let config = Config::new("/app")
            .with_env(|key| (key == DRIVERS_PATH_ENV).then(|| "engines".to_string()))
            .with_drivers_path(Some(PathBuf::from("vendor/drivers")));
        assert_eq!(config.drivers_root(), PathBuf::from("/app/vendor/drivers"));
        assert_eq!(config.lock_path(), PathBuf::from("/app/tmp/drivers.lock"));
    }

    #[test]
    fn lock_file_sits_beside_a_custom_quarantine() {
        let mut config = Config::new("/app");
        config.quarantine_path = PathBuf::from("tmp/parked");
        assert_eq!(config.lock_path(), PathBuf::from("/app/tmp/drivers.lock"));
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let config = Config::new("/app").with_env(|_| Some(String::new()));
        assert_eq!(config.drivers_path, PathBuf::from("drivers"));
        assert!(config.scoped_driver.is_none());
    }
}
