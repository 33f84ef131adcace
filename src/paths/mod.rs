//! Search paths contributed by drivers.
//!
//! The [`PathSet`] is the accumulator the host consumes: one ordered list of
//! directories per [`ResourceCategory`] plus the code search (autoload) path.
//! It is filled by the [`PathInstaller`] during bootstrap and frozen after.

mod install;
mod routes;

pub use install::{InstallMode, PathInstaller};
pub use routes::{driver_route_files, ROUTES_FILE};

use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

/// Fixed kinds of paths the host resolves resources from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ResourceCategory {
    /// `app`
    #[serde(rename = "app")]
    App,
    /// `app/assets`
    #[serde(rename = "app/assets")]
    Assets,
    /// `app/models`
    #[serde(rename = "app/models")]
    Models,
    /// `app/views`
    #[serde(rename = "app/views")]
    Views,
    /// `app/controllers`
    #[serde(rename = "app/controllers")]
    Controllers,
    /// `app/mailers`
    #[serde(rename = "app/mailers")]
    Mailers,
    /// `config/initializers`
    #[serde(rename = "config/initializers")]
    Initializers,
    /// `db`
    #[serde(rename = "db")]
    Db,
    /// `db/migrate`
    #[serde(rename = "db/migrate")]
    Migrations,
    /// `lib`
    #[serde(rename = "lib")]
    Lib,
}

impl ResourceCategory {
    /// Every category, in installation order.
    pub const ALL: [Self; 10] = [
        Self::App,
        Self::Assets,
        Self::Models,
        Self::Views,
        Self::Controllers,
        Self::Mailers,
        Self::Initializers,
        Self::Db,
        Self::Migrations,
        Self::Lib,
    ];

    /// Conventional location of this category inside an application or driver.
    #[must_use]
    pub fn subpath(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Assets => "app/assets",
            Self::Models => "app/models",
            Self::Views => "app/views",
            Self::Controllers => "app/controllers",
            Self::Mailers => "app/mailers",
            Self::Initializers => "config/initializers",
            Self::Db => "db",
            Self::Migrations => "db/migrate",
            Self::Lib => "lib",
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subpath())
    }
}

/// Ordered search paths per category, plus the code search path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathSet {
    categories: BTreeMap<ResourceCategory, Vec<PathBuf>>,
    autoload: Vec<PathBuf>,
}

impl PathSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding the host application's own directories, one
    /// per category, before any driver is added.
    #[must_use]
    pub fn with_host_defaults(app_root: &Path) -> Self {
        let mut set = Self::new();
        for category in ResourceCategory::ALL {
            set.push(category, app_root.join(category.subpath()));
        }
        set
    }

    /// Entries for `category`, in insertion order.
    #[must_use]
    pub fn get(&self, category: ResourceCategory) -> &[PathBuf] {
        self.categories.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Appends an entry. Duplicates are kept.
    pub fn push(&mut self, category: ResourceCategory, path: PathBuf) {
        self.categories.entry(category).or_default().push(path);
    }

    /// Replaces every entry of `category`.
    pub fn replace(&mut self, category: ResourceCategory, paths: Vec<PathBuf>) {
        self.categories.insert(category, paths);
    }

    /// Code search path entries, in insertion order.
    #[must_use]
    pub fn autoload(&self) -> &[PathBuf] {
        &self.autoload
    }

    /// Appends a code search path entry.
    pub fn push_autoload(&mut self, path: PathBuf) {
        self.autoload.push(path);
    }

    /// Ends the mutable phase.
    #[must_use]
    pub fn freeze(self) -> FrozenPathSet {
        FrozenPathSet(Arc::new(self))
    }
}

/// Read-only [`PathSet`] handed out after bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrozenPathSet(Arc<PathSet>);

impl Deref for FrozenPathSet {
    type Target = PathSet;

    fn deref(&self) -> &PathSet {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subpaths_are_unique() {
        let mut seen: Vec<&str> = ResourceCategory::ALL.iter().map(|c| c.subpath()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ResourceCategory::ALL.len());
    }

    #[test]
    fn push_keeps_order_and_duplicates() {
        let mut set = PathSet::new();
        set.push(ResourceCategory::Views, PathBuf::from("a"));
        set.push(ResourceCategory::Views, PathBuf::from("b"));
        set.push(ResourceCategory::Views, PathBuf::from("a"));
        assert_eq!(set.get(ResourceCategory::Views), [PathBuf::from("a"), "b".into(), "a".into()]);
        assert!(set.get(ResourceCategory::Models).is_empty());
    }

    #[test]
    fn host_defaults_cover_every_category() {
        let set = PathSet::with_host_defaults(Path::new("/app"));
        for category in ResourceCategory::ALL {
            assert_eq!(set.get(category), [Path::new("/app").join(category.subpath())]);
        }
        assert!(set.autoload().is_empty());
    }

    #[test]
    fn serializes_categories_by_subpath() {
        let mut set = PathSet::new();
        set.push(ResourceCategory::Migrations, PathBuf::from("drivers/store/db/migrate"));
        set.push_autoload(PathBuf::from("drivers"));
        let json = serde_json::to_value(set.freeze()).unwrap();
        assert_eq!(json["categories"]["db/migrate"][0], "drivers/store/db/migrate");
        assert_eq!(json["autoload"][0], "drivers");
    }
}
