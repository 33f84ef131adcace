//! `driverkit paths` command.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::bootstrap::Application;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{DriverError, Result};
use crate::paths::{FrozenPathSet, ResourceCategory};
use crate::registry::FrozenDrivers;

/// What bootstrap produced, as printed by `paths --json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    drivers: &'a FrozenDrivers,
    scoped_driver: Option<&'a str>,
    paths: &'a FrozenPathSet,
    route_files: &'a [PathBuf],
}

/// Boots the application and prints the installed search paths.
///
/// # Errors
///
/// Returns bootstrap errors, e.g. an unknown scoped driver.
pub fn run(ctx: &ServiceContext, config: &Config, json: bool) -> Result<()> {
    let app = Application::boot(ctx, config.clone())?;
    let out = render(&app, json).map_err(|e| DriverError::io(&config.app_root, e.into()))?;
    println!("{out}");
    Ok(())
}

fn render(app: &Application, json: bool) -> serde_json::Result<String> {
    let report = Report {
        drivers: app.drivers(),
        scoped_driver: app.config().scoped_driver.as_deref(),
        paths: app.paths(),
        route_files: app.route_files(),
    };
    if json {
        return serde_json::to_string_pretty(&report);
    }

    let mut out = String::new();
    match report.scoped_driver {
        Some(name) => {
            let _ = writeln!(out, "Scoped to {name}");
        }
        None => {
            let _ = writeln!(out, "Drivers: {}", report.drivers.names().join(", "));
        }
    }
    for category in ResourceCategory::ALL {
        let _ = writeln!(out, "{category}:");
        for path in report.paths.get(category) {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
    let _ = writeln!(out, "autoload:");
    for path in report.paths.autoload() {
        let _ = writeln!(out, "  {}", path.display());
    }
    if !report.route_files.is_empty() {
        let _ = writeln!(out, "routes:");
        for path in report.route_files {
            let _ = writeln!(out, "  {}", path.display());
        }
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot(dir: &std::path::Path, scoped: Option<&str>) -> Application {
        let mut config = Config::new(dir);
        config.scoped_driver = scoped.map(str::to_string);
        Application::boot(&ServiceContext::live(), config).unwrap()
    }

    #[test]
    fn json_lists_categories_and_drivers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("drivers/store")).unwrap();
        let out = render(&boot(dir.path(), None), true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["drivers"], serde_json::json!(["store"]));
        assert!(value["scoped_driver"].is_null());
        let views = value["paths"]["categories"]["app/views"].as_array().unwrap();
        assert_eq!(views.len(), 2);
        assert!(views[1].as_str().unwrap().ends_with("drivers/store/app/views"));
    }

    #[test]
    fn text_names_scoped_driver() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("drivers/store")).unwrap();
        let out = render(&boot(dir.path(), Some("store")), false).unwrap();

        assert!(out.starts_with("Scoped to store\n"));
        assert!(out.contains("db/migrate:\n  "));
        assert!(!out.contains("routes:"));
    }
}
