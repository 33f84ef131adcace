//! Detection of host methods that hide mixed-in module methods.

use std::fmt;

use super::{DeclaresMethods, MixinKind, MixinRecord};

/// A mixed-in module method hidden by a method of the host type itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowWarning {
    /// Extension or override.
    pub kind: MixinKind,
    /// The mixed-in module whose method is hidden.
    pub module: String,
    /// The shared method name.
    pub method: String,
    /// The host type.
    pub target: String,
}

impl fmt::Display for ShadowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Driver {} method {}#{} is shadowed by {}#{} and will likely not do anything.",
            self.kind, self.module, self.method, self.target, self.method
        )
    }
}

impl MixinRecord {
    /// Warnings for a host method named `method`: one per mixed-in module
    /// that also declares it.
    #[must_use]
    pub fn shadowed_by(&self, method: &str) -> Vec<ShadowWarning> {
        self.mixed_modules()
            .iter()
            .filter(|module| module.declares(method))
            .map(|module| ShadowWarning {
                kind: self.kind(),
                module: module.name.clone(),
                method: method.to_string(),
                target: self.target_type_name().to_string(),
            })
            .collect()
    }
}

/// Checks every method of `target` against `record` and logs each hit.
pub fn check_shadowing(target: &dyn DeclaresMethods, record: &MixinRecord) -> Vec<ShadowWarning> {
    let warnings: Vec<ShadowWarning> = target
        .declared_methods()
        .iter()
        .flat_map(|method| record.shadowed_by(method))
        .collect();
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixin::{ModuleRef, TargetType};
    use std::path::PathBuf;

    fn module(name: &str, driver: &str, methods: &[&str]) -> ModuleRef {
        ModuleRef {
            name: name.into(),
            source_path: PathBuf::from(format!("drivers/{driver}/extensions/product_extension.rb")),
            owning_driver: driver.into(),
            declared_methods: methods.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    #[test]
    fn warning_message_format() {
        let record = MixinRecord::new(
            "Product".into(),
            MixinKind::Extension,
            vec![module("Store::ProductExtension", "store", &["say_hello"])],
        );
        let warnings = record.shadowed_by("say_hello");
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].to_string(),
            "Driver extension method Store::ProductExtension#say_hello is shadowed by \
             Product#say_hello and will likely not do anything."
        );
    }

    #[test]
    fn one_warning_per_shadowed_module() {
        let record = MixinRecord::new(
            "Product".into(),
            MixinKind::Extension,
            vec![
                module("Admin::ProductExtension", "admin", &["say_hello", "admin_method"]),
                module("Store::ProductExtension", "store", &["say_hello"]),
                module("Audit::ProductExtension", "audit", &["audit"]),
            ],
        );
        let target = TargetType::new("Product").with_methods(["say_hello", "price"]);
        let warnings = check_shadowing(&target, &record);

        let modules: Vec<&str> = warnings.iter().map(|w| w.module.as_str()).collect();
        assert_eq!(modules, vec!["Admin::ProductExtension", "Store::ProductExtension"]);
        assert!(warnings.iter().all(|w| w.method == "say_hello" && w.target == "Product"));
    }

    #[test]
    fn no_overlap_no_warnings() {
        let record = MixinRecord::new(
            "Product".into(),
            MixinKind::Override,
            vec![module("ProductOverride", "store", &["override_method"])],
        );
        let target = TargetType::new("Product").with_methods(["say_hello"]);
        assert!(check_shadowing(&target, &record).is_empty());
    }
}
