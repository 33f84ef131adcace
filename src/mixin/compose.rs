//! Method resolution over a host type and its mixed-in modules.

use std::collections::BTreeSet;

use super::{DeclaresMethods, MixinRecord, ModuleRef, ShadowWarning, TargetType};

/// Where a method call on a composed type lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSource<'a> {
    /// Defined directly on the host type.
    Own,
    /// Provided by a mixed-in module.
    Mixin(&'a ModuleRef),
}

/// A host type together with the modules mixed into it.
///
/// Lookup order matches module inclusion: the type itself first, then the
/// most recently mixed module back to the first.
#[derive(Debug, Clone)]
pub struct Composed {
    target: TargetType,
    record: MixinRecord,
}

impl Composed {
    /// Composes `target` with the modules in `record`.
    #[must_use]
    pub fn new(target: TargetType, record: MixinRecord) -> Self {
        Self { target, record }
    }

    /// The host type.
    #[must_use]
    pub fn target(&self) -> &TargetType {
        &self.target
    }

    /// The mixing record.
    #[must_use]
    pub fn record(&self) -> &MixinRecord {
        &self.record
    }

    /// Resolves `method` to its provider.
    #[must_use]
    pub fn resolve(&self, method: &str) -> Option<MethodSource<'_>> {
        if self.target.declares(method) {
            return Some(MethodSource::Own);
        }
        self.record
            .mixed_modules()
            .iter()
            .rev()
            .find(|module| module.declares(method))
            .map(MethodSource::Mixin)
    }

    /// Whether any provider answers `method`.
    #[must_use]
    pub fn responds_to(&self, method: &str) -> bool {
        self.resolve(method).is_some()
    }

    /// All callable method names.
    #[must_use]
    pub fn method_names(&self) -> BTreeSet<&str> {
        self.target
            .declared_methods()
            .iter()
            .chain(self.record.mixed_modules().iter().flat_map(|m| m.declared_methods.iter()))
            .map(String::as_str)
            .collect()
    }

    /// Declares `method` on the host type after mixing.
    ///
    /// The definition always takes effect; any mixed-in method of the same
    /// name is reported (and logged) as shadowed.
    pub fn define_method(&mut self, method: impl Into<String>) -> Vec<ShadowWarning> {
        let method = method.into();
        let warnings = self.record.shadowed_by(&method);
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        self.target.insert_method(method);
        warnings
    }
}
