//! Scaffolding for new drivers.

mod templates;

use std::path::PathBuf;

use heck::ToSnakeCase;

use crate::error::{DriverError, Result};
use crate::mixin::naming::classify;
use crate::ports::filesystem::FileSystem;

/// Empty directories every driver starts with, relative to the driver root.
/// `{name}` is replaced by the driver name.
const KEEP_DIRS: [&str; 7] = [
    "app/models/{name}",
    "app/controllers/{name}",
    "app/views/{name}",
    "spec",
    "db/migrate",
    "lib/tasks",
    "extensions",
];

/// Creates driver skeletons under a drivers root.
pub struct DriverGenerator<'a> {
    fs: &'a dyn FileSystem,
    drivers_root: PathBuf,
}

impl<'a> DriverGenerator<'a> {
    /// Creates a generator writing under `drivers_root`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, drivers_root: impl Into<PathBuf>) -> Self {
        Self { fs, drivers_root: drivers_root.into() }
    }

    /// Scaffolds the driver `name` (normalized to snake_case) and returns
    /// the files written.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Validation`] for a blank name,
    /// [`DriverError::Collision`] if the driver directory already exists and
    /// [`DriverError::Io`] if a file cannot be written.
    pub fn generate(&self, name: &str) -> Result<Vec<PathBuf>> {
        let file_name = name.trim().to_snake_case();
        if file_name.is_empty() {
            return Err(DriverError::Validation("No driver specified".into()));
        }
        let root = self.drivers_root.join(&file_name);
        if self.fs.exists(&root) {
            return Err(DriverError::Collision(format!(
                "driver {file_name} already exists at {}",
                root.display()
            )));
        }

        let module_name = classify(&file_name);
        let mut files: Vec<(PathBuf, String)> = KEEP_DIRS
            .iter()
            .map(|dir| (root.join(dir.replace("{name}", &file_name)).join(".keep"), String::new()))
            .collect();
        files.extend([
            (root.join("config/routes.rb"), templates::routes()),
            (
                root.join("config/initializers").join(format!("{file_name}_feature.rb")),
                templates::initializer(&file_name, &module_name),
            ),
            (
                root.join("app/models").join(format!("{file_name}.rb")),
                templates::module(&module_name),
            ),
            (root.join("README.md"), templates::readme(&file_name, &module_name)),
        ]);

        for (path, contents) in &files {
            self.fs.write(path, contents).map_err(|e| DriverError::io(path, e))?;
        }
        tracing::info!(driver = %file_name, files = files.len(), "generated driver");
        Ok(files.into_iter().map(|(path, _)| path).collect())
    }
}
