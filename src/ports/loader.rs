//! Module loader port: turns an auxiliary source file into module definitions.

use std::collections::BTreeSet;
use std::path::Path;

/// A module (or type) defined by a loaded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    /// Fully qualified name, `::`-separated (e.g. `Store::ProductExtension`).
    pub name: String,
    /// Instance methods the module declares.
    pub methods: BTreeSet<String>,
}

impl ModuleDefinition {
    /// Creates a definition from a name and its method names.
    pub fn new<I, S>(name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), methods: methods.into_iter().map(Into::into).collect() }
    }
}

/// Loads and defines modules from source files.
///
/// The mixer asks the loader for everything a file defines and then picks
/// the conventionally named module out of the result.
pub trait ModuleLoader: Send + Sync {
    /// Loads the file at `path`, returning every module it defines.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or evaluated.
    fn load(
        &self,
        path: &Path,
    ) -> Result<Vec<ModuleDefinition>, Box<dyn std::error::Error + Send + Sync>>;
}
