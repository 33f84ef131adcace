//! Records of what was mixed into which type.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use super::{DeclaresMethods, MixinKind, ModuleMixer};
use crate::error::{DriverError, Result};

/// A driver module that was mixed into a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRef {
    /// Fully qualified module name.
    pub name: String,
    /// File the module was loaded from.
    pub source_path: PathBuf,
    /// Driver that owns the file.
    pub owning_driver: String,
    /// Instance methods the module declares.
    pub declared_methods: BTreeSet<String>,
}

impl DeclaresMethods for ModuleRef {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn declared_methods(&self) -> &BTreeSet<String> {
        &self.declared_methods
    }
}

/// The modules mixed into one target type, in mixing order.
///
/// Immutable once built; a reload builds a fresh record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixinRecord {
    target_type_name: String,
    kind: MixinKind,
    mixed_modules: Arc<[ModuleRef]>,
}

impl MixinRecord {
    pub(crate) fn new(target_type_name: String, kind: MixinKind, modules: Vec<ModuleRef>) -> Self {
        Self { target_type_name, kind, mixed_modules: modules.into() }
    }

    /// Name of the type the modules were mixed into.
    #[must_use]
    pub fn target_type_name(&self) -> &str {
        &self.target_type_name
    }

    /// Extension or override.
    #[must_use]
    pub fn kind(&self) -> MixinKind {
        self.kind
    }

    /// Mixed-in modules, in driver discovery order.
    #[must_use]
    pub fn mixed_modules(&self) -> &[ModuleRef] {
        &self.mixed_modules
    }

    /// Names of the mixed-in modules.
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        self.mixed_modules.iter().map(|m| m.name.as_str()).collect()
    }
}

/// One record per `(type, kind)` for the life of a process (or until reload).
#[derive(Debug, Default)]
pub struct MixinRegistry {
    records: HashMap<(String, MixinKind), MixinRecord>,
}

impl MixinRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `target` through `mixer` and keeps the record.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Collision`] if `target` was already attached for
    /// `kind` since the last reload, or any error from
    /// [`ModuleMixer::attach`].
    pub fn attach(
        &mut self,
        mixer: &ModuleMixer<'_>,
        target: &dyn DeclaresMethods,
        kind: MixinKind,
    ) -> Result<&MixinRecord> {
        let key = (target.type_name().to_string(), kind);
        if self.records.contains_key(&key) {
            return Err(DriverError::Collision(format!(
                "{} already has its driver {kind}s attached",
                target.type_name()
            )));
        }
        let record = mixer.attach(target, kind)?;
        Ok(self.records.entry(key).or_insert(record))
    }

    /// The record for `type_name`, if attached.
    #[must_use]
    pub fn get(&self, type_name: &str, kind: MixinKind) -> Option<&MixinRecord> {
        self.records.get(&(type_name.to_string(), kind))
    }

    /// Drops every record so the next attach re-reads driver files.
    pub fn reload(&mut self) {
        tracing::debug!(count = self.records.len(), "dropping mixin records");
        self.records.clear();
    }
}
