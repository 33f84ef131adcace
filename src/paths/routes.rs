//! Driver route files.

use std::path::PathBuf;

use super::InstallMode;
use crate::ports::filesystem::FileSystem;
use crate::registry::Driver;

/// Route file location inside a driver.
pub const ROUTES_FILE: &str = "config/routes.rb";

/// Route files the host should load on top of its own, in driver order.
///
/// A scoped driver already stands in for the application, so its routes are
/// the application's routes and nothing extra is returned.
#[must_use]
pub fn driver_route_files(
    fs: &dyn FileSystem,
    drivers: &[Driver],
    mode: &InstallMode,
) -> Vec<PathBuf> {
    if matches!(mode, InstallMode::ReplaceWithSingle(_)) {
        return Vec::new();
    }
    drivers.iter().map(|d| d.join(ROUTES_FILE)).filter(|path| fs.exists(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;

    #[test]
    fn only_existing_route_files_are_returned() {
        let dir = tempfile::tempdir().unwrap();
        let store = Driver { name: "store".into(), root_path: dir.path().join("store") };
        let admin = Driver { name: "admin".into(), root_path: dir.path().join("admin") };
        std::fs::create_dir_all(store.join("config")).unwrap();
        std::fs::write(store.join(ROUTES_FILE), "").unwrap();
        std::fs::create_dir_all(&admin.root_path).unwrap();

        let drivers = vec![admin, store.clone()];
        let files = driver_route_files(&LiveFileSystem, &drivers, &InstallMode::MergeAll);
        assert_eq!(files, vec![store.join(ROUTES_FILE)]);

        let scoped = InstallMode::ReplaceWithSingle("store".into());
        assert!(driver_route_files(&LiveFileSystem, &drivers, &scoped).is_empty());
    }
}
