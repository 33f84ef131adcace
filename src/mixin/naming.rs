//! Naming conventions linking type names, file names and module names.
//!
//! `Product` + extension -> file stem `product_extension`, module
//! `Store::ProductExtension` (per-driver) or `ProductExtension` (global).

use heck::{ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

use super::MixinKind;

/// How the module inside a driver's extension/override file is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespacing {
    /// `<Driver>::<Type><Suffix>`; modules from different drivers never collide.
    #[default]
    PerDriver,
    /// `<Type><Suffix>`, shared by every driver.
    Global,
}

/// `Admin::ProductCategory` -> `admin/product_category`.
#[must_use]
pub fn underscore(type_name: &str) -> String {
    type_name.split("::").map(|segment| segment.to_snake_case()).collect::<Vec<_>>().join("/")
}

/// `store_front` -> `StoreFront`. Plural names stay plural: `stores` -> `Stores`.
#[must_use]
pub fn classify(driver_name: &str) -> String {
    driver_name.to_upper_camel_case()
}

/// File stem (without extension) a driver uses for `type_name`.
#[must_use]
pub fn expected_file_stem(type_name: &str, kind: MixinKind) -> String {
    format!("{}_{}", underscore(type_name), kind.suffix().to_snake_case())
}

/// Fully qualified module name a driver's file must define.
#[must_use]
pub fn expected_module_name(
    namespacing: Namespacing,
    driver_name: &str,
    type_name: &str,
    kind: MixinKind,
) -> String {
    match namespacing {
        Namespacing::PerDriver => {
            format!("{}::{type_name}{}", classify(driver_name), kind.suffix())
        }
        Namespacing::Global => format!("{type_name}{}", kind.suffix()),
    }
}
