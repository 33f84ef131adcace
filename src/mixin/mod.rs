//! Extensions and overrides: driver modules mixed into host types.
//!
//! A host type opts in by being attached through a [`MixinRegistry`]. The
//! [`ModuleMixer`] looks in every driver for a file named after the type
//! (`extensions/product_extension.rb`), loads it through the module loader
//! port, and records which module each driver contributed. Method
//! resolution over the result is explicit delegation ([`Composed`]): the
//! host type's own methods win, then modules in reverse mixing order.

mod compose;
mod mixer;
pub mod naming;
mod record;
mod shadow;

pub use compose::{Composed, MethodSource};
pub use mixer::ModuleMixer;
pub use naming::Namespacing;
pub use record::{MixinRecord, MixinRegistry, ModuleRef};
pub use shadow::{check_shadowing, ShadowWarning};

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ports::loader::ModuleDefinition;

/// The two flavors of driver mixins. They differ only in naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MixinKind {
    /// `extensions/<type>_extension.rb` defining `<Type>Extension`.
    Extension,
    /// `overrides/<type>_override.rb` defining `<Type>Override`.
    Override,
}

impl MixinKind {
    /// Module name suffix.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Extension => "Extension",
            Self::Override => "Override",
        }
    }

    /// Directory inside a driver holding files of this kind.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Extension => "extensions",
            Self::Override => "overrides",
        }
    }
}

impl std::fmt::Display for MixinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Extension => "extension",
            Self::Override => "override",
        })
    }
}

/// Anything with a name and a known set of instance methods.
///
/// Host types implement it to take part in mixing; mixed-in modules
/// implement it so shadowing can be checked by set membership.
pub trait DeclaresMethods {
    /// Fully qualified type or module name.
    fn type_name(&self) -> &str;

    /// Instance methods declared directly on this type or module.
    fn declared_methods(&self) -> &BTreeSet<String>;

    /// Whether `method` is declared directly here.
    fn declares(&self, method: &str) -> bool {
        self.declared_methods().contains(method)
    }
}

/// A host type registered for mixing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    name: String,
    methods: BTreeSet<String>,
}

impl TargetType {
    /// Creates a target with no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), methods: BTreeSet::new() }
    }

    /// Adds methods declared by the host type.
    #[must_use]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.extend(methods.into_iter().map(Into::into));
        self
    }

    pub(crate) fn insert_method(&mut self, method: String) {
        self.methods.insert(method);
    }
}

impl From<ModuleDefinition> for TargetType {
    fn from(def: ModuleDefinition) -> Self {
        Self { name: def.name, methods: def.methods }
    }
}

impl DeclaresMethods for TargetType {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn declared_methods(&self) -> &BTreeSet<String> {
        &self.methods
    }
}
