//! Application bootstrap: scan drivers once, install their paths, freeze.
//!
//! ```text
//! Bootstrap::new ─► install ─► finish ─► Application (read-only paths/drivers)
//!                                          └─ attach(type) per mixin target
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::mixin::{DeclaresMethods, MixinKind, MixinRecord, MixinRegistry, ModuleMixer};
use crate::paths::{driver_route_files, FrozenPathSet, InstallMode, PathInstaller, PathSet};
use crate::registry::{Driver, DriverRegistry, FrozenDrivers, LoadedDrivers, MissingRoot};

/// Mutable bootstrap phase.
pub struct Bootstrap<'a> {
    ctx: &'a ServiceContext,
    config: Config,
    paths: PathSet,
    loaded: LoadedDrivers,
    route_files: Vec<PathBuf>,
}

impl<'a> Bootstrap<'a> {
    /// Starts a bootstrap with the host application's default paths.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: Config) -> Self {
        let paths = PathSet::with_host_defaults(&config.app_root);
        Self { ctx, config, paths, loaded: LoadedDrivers::new(), route_files: Vec::new() }
    }

    /// Path set as installed so far.
    #[must_use]
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Scans the drivers root and installs driver paths per the configured mode.
    ///
    /// # Errors
    ///
    /// Returns registry errors; in scoped mode, [`DriverError::Validation`]
    /// if the scoped name is not a plain directory name and
    /// [`DriverError::NotFound`] if the scoped driver does not exist.
    ///
    /// [`DriverError::Validation`]: crate::error::DriverError::Validation
    /// [`DriverError::NotFound`]: crate::error::DriverError::NotFound
    pub fn install(&mut self) -> Result<&mut Self> {
        let registry = DriverRegistry::new(self.ctx.fs.as_ref(), self.config.drivers_root());
        let (drivers, mode): (Vec<Driver>, InstallMode) = match self.config.install_mode() {
            InstallMode::MergeAll => {
                (registry.list_drivers(MissingRoot::Tolerate)?, InstallMode::MergeAll)
            }
            InstallMode::ReplaceWithSingle(name) => {
                let driver = registry.find(&name)?;
                let mode = InstallMode::ReplaceWithSingle(driver.name.clone());
                (vec![driver], mode)
            }
        };

        PathInstaller::new(self.config.drivers_root()).install(&drivers, &mut self.paths, &mode)?;
        self.route_files.extend(driver_route_files(self.ctx.fs.as_ref(), &drivers, &mode));
        for driver in &drivers {
            self.loaded.record(driver.name.clone());
        }
        tracing::info!(
            drivers = drivers.len(),
            scoped = ?self.config.scoped_driver,
            "installed driver paths"
        );
        Ok(self)
    }

    /// Ends bootstrap. Paths and the loaded-driver list become read-only.
    #[must_use]
    pub fn finish(self) -> Application {
        Application {
            config: self.config,
            paths: self.paths.freeze(),
            drivers: self.loaded.freeze(),
            route_files: self.route_files.into(),
            mixins: MixinRegistry::new(),
        }
    }
}

/// The application after bootstrap.
#[derive(Debug)]
pub struct Application {
    config: Config,
    paths: FrozenPathSet,
    drivers: FrozenDrivers,
    route_files: Arc<[PathBuf]>,
    mixins: MixinRegistry,
}

impl Application {
    /// Runs a full bootstrap.
    ///
    /// # Errors
    ///
    /// See [`Bootstrap::install`].
    pub fn boot(ctx: &ServiceContext, config: Config) -> Result<Self> {
        let mut bootstrap = Bootstrap::new(ctx, config);
        bootstrap.install()?;
        Ok(bootstrap.finish())
    }

    /// Configuration the application was booted with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Installed search paths.
    #[must_use]
    pub fn paths(&self) -> &FrozenPathSet {
        &self.paths
    }

    /// Drivers that completed bootstrap.
    #[must_use]
    pub fn drivers(&self) -> &FrozenDrivers {
        &self.drivers
    }

    /// Driver route files the host should load, in driver order.
    #[must_use]
    pub fn route_files(&self) -> &[PathBuf] {
        &self.route_files
    }

    /// Attaches driver mixins of `kind` to `target` the first time it loads.
    ///
    /// # Errors
    ///
    /// See [`MixinRegistry::attach`].
    pub fn attach(
        &mut self,
        ctx: &ServiceContext,
        target: &dyn DeclaresMethods,
        kind: MixinKind,
    ) -> Result<&MixinRecord> {
        let mixer = ModuleMixer::new(ctx.fs.as_ref(), ctx.loader.as_ref(), &self.config);
        self.mixins.attach(&mixer, target, kind)
    }

    /// Record for an already attached type.
    #[must_use]
    pub fn mixin_record(&self, type_name: &str, kind: MixinKind) -> Option<&MixinRecord> {
        self.mixins.get(type_name, kind)
    }

    /// Forgets all mixin records; the next attach re-reads driver files.
    pub fn reload_mixins(&mut self) {
        self.mixins.reload();
    }
}
