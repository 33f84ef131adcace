//! `driverkit list` command.

use std::fmt::Write as _;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::fileset::DriverFileset;
use crate::registry::{DriverRegistry, MissingRoot};

/// Prints active and hidden drivers.
///
/// # Errors
///
/// Returns registry errors, e.g. when the drivers root is a file.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<()> {
    let active: Vec<String> = DriverRegistry::new(ctx.fs.as_ref(), config.drivers_root())
        .list_drivers(MissingRoot::Tolerate)?
        .into_iter()
        .map(|driver| driver.name)
        .collect();
    let hidden = DriverFileset::from_config(ctx.fs.as_ref(), config).quarantined()?;
    print!("{}", render(&active, &hidden));
    Ok(())
}

fn render(active: &[String], hidden: &[String]) -> String {
    if active.is_empty() && hidden.is_empty() {
        return "No drivers found.\n".to_string();
    }
    let mut out = String::new();
    for (title, names) in [("Active", active), ("Hidden", hidden)] {
        if names.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{title} drivers:");
        for name in names {
            let _ = writeln!(out, "  {name}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_groups_by_state() {
        let out = render(&["alpha".into()], &["beta".into(), "gamma".into()]);
        assert_eq!(out, "Active drivers:\n  alpha\nHidden drivers:\n  beta\n  gamma\n");
    }

    #[test]
    fn render_empty() {
        assert_eq!(render(&[], &[]), "No drivers found.\n");
    }

    #[test]
    fn run_tolerates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live();
        assert!(run(&ctx, &Config::new(dir.path())).is_ok());
    }
}
