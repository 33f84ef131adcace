//! `driverkit isolate` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::fileset::{DriverFileset, FilesetLock};
use crate::registry::driver_name;

/// Hides every driver except `name`.
///
/// # Errors
///
/// Returns [`DriverError::Validation`] when no usable name is given,
/// [`DriverError::NotFound`] for an unknown driver and
/// [`DriverError::Collision`] if quarantine is in the way or another
/// operation holds the lock.
///
/// [`DriverError::Validation`]: crate::error::DriverError::Validation
/// [`DriverError::NotFound`]: crate::error::DriverError::NotFound
/// [`DriverError::Collision`]: crate::error::DriverError::Collision
pub fn run(ctx: &ServiceContext, config: &Config, name: Option<&str>) -> Result<()> {
    let name = driver_name(name.unwrap_or_default())?;
    let _lock = FilesetLock::acquire(config.lock_path())?;
    let hidden = DriverFileset::from_config(ctx.fs.as_ref(), config).isolate(name)?;
    if hidden.is_empty() {
        println!("Only {name} is active; nothing to hide.");
    } else {
        println!("Isolated {name}; hid {}.", hidden.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverError;

    fn app(names: &[&str]) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::create_dir_all(dir.path().join("drivers").join(name)).unwrap();
        }
        let config = Config::new(dir.path());
        (dir, config)
    }

    #[test]
    fn missing_name_is_rejected_before_touching_disk() {
        let (dir, config) = app(&["alpha"]);
        let ctx = ServiceContext::live();
        for name in [None, Some(""), Some("  ")] {
            let err = run(&ctx, &config, name).unwrap_err();
            assert_eq!(err.to_string(), "No driver specified");
        }
        assert!(!dir.path().join("tmp").exists());
    }

    #[test]
    fn hides_other_drivers() {
        let (dir, config) = app(&["alpha", "beta"]);
        let ctx = ServiceContext::live();
        run(&ctx, &config, Some("alpha")).unwrap();
        assert!(dir.path().join("drivers/alpha").is_dir());
        assert!(dir.path().join("tmp/drivers/beta").is_dir());
    }

    #[test]
    fn parent_directory_name_is_rejected() {
        let (dir, config) = app(&["alpha", "beta"]);
        let ctx = ServiceContext::live();
        let err = run(&ctx, &config, Some("..")).unwrap_err();
        assert!(matches!(err, DriverError::Validation(_)));
        assert!(dir.path().join("drivers/alpha").is_dir());
        assert!(dir.path().join("drivers/beta").is_dir());
    }

    #[test]
    fn unknown_driver_is_not_found() {
        let (_dir, config) = app(&["alpha"]);
        let ctx = ServiceContext::live();
        let err = run(&ctx, &config, Some("gamma")).unwrap_err();
        assert!(matches!(err, DriverError::NotFound(n) if n == "gamma"));
    }
}
