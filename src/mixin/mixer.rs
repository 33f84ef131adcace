//! Discovery, loading and resolution of driver mixin modules.

use std::path::PathBuf;

use super::{
    check_shadowing, naming, DeclaresMethods, MixinKind, MixinRecord, ModuleRef, Namespacing,
};
use crate::config::Config;
use crate::error::{DriverError, Result};
use crate::ports::filesystem::FileSystem;
use crate::ports::loader::ModuleLoader;
use crate::registry::{Driver, DriverRegistry, MissingRoot};

/// Builds [`MixinRecord`]s by scanning drivers for convention-named files.
pub struct ModuleMixer<'a> {
    fs: &'a dyn FileSystem,
    loader: &'a dyn ModuleLoader,
    drivers_root: PathBuf,
    namespacing: Namespacing,
    source_extension: String,
}

impl<'a> ModuleMixer<'a> {
    /// Creates a mixer using the drivers root and naming from `config`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, loader: &'a dyn ModuleLoader, config: &Config) -> Self {
        Self {
            fs,
            loader,
            drivers_root: config.drivers_root(),
            namespacing: config.namespacing,
            source_extension: config.source_extension.clone(),
        }
    }

    /// Drivers holding a `kind` file for `type_name`, with that file's path,
    /// in discovery order.
    ///
    /// # Errors
    ///
    /// Propagates registry errors other than a missing drivers root.
    pub fn candidates(&self, type_name: &str, kind: MixinKind) -> Result<Vec<(Driver, PathBuf)>> {
        let file_name =
            format!("{}.{}", naming::expected_file_stem(type_name, kind), self.source_extension);
        let drivers =
            DriverRegistry::new(self.fs, &self.drivers_root).list_drivers(MissingRoot::Tolerate)?;
        Ok(drivers
            .into_iter()
            .filter_map(|driver| {
                let path = driver.join(kind.dir_name()).join(&file_name);
                self.fs.exists(&path).then_some((driver, path))
            })
            .collect())
    }

    /// Mixes every matching driver module into `target`.
    ///
    /// Shadowed methods already declared by `target` are logged as warnings;
    /// call [`check_shadowing`] again or use
    /// [`Composed::define_method`](super::Composed::define_method) for
    /// methods declared later.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Loader`] if a matching file cannot be loaded
    /// and [`DriverError::Resolution`] if it does not define the expected
    /// module.
    pub fn attach(&self, target: &dyn DeclaresMethods, kind: MixinKind) -> Result<MixinRecord> {
        let type_name = target.type_name();
        let mut modules = Vec::new();

        for (driver, path) in self.candidates(type_name, kind)? {
            let definitions = self.loader.load(&path).map_err(|e| DriverError::Loader {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let expected =
                naming::expected_module_name(self.namespacing, &driver.name, type_name, kind);
            let Some(definition) = definitions.into_iter().find(|d| d.name == expected) else {
                return Err(DriverError::Resolution { expected, path });
            };

            tracing::debug!(
                target_type = type_name,
                module = %definition.name,
                driver = %driver.name,
                "mixed in driver {kind}"
            );
            modules.push(ModuleRef {
                name: definition.name,
                source_path: path,
                owning_driver: driver.name,
                declared_methods: definition.methods,
            });
        }

        let record = MixinRecord::new(type_name.to_string(), kind, modules);
        check_shadowing(target, &record);
        Ok(record)
    }
}
