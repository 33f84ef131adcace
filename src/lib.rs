//! Core library entry for the `driverkit` CLI.
//!
//! Drivers are self-contained feature directories under `drivers/`. The
//! library scans them ([`registry`]), splices their subtrees into the host's
//! search paths ([`paths`], [`bootstrap`]), mixes their extension and
//! override modules into host types ([`mixin`]) and hides or restores them
//! on disk ([`fileset`]).

pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fileset;
pub mod generate;
pub mod mixin;
pub mod paths;
pub mod ports;
pub mod registry;

pub use error::{DriverError, Result};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    init_tracing(cli.verbose);
    commands::dispatch(&cli)
}

/// Installs the stderr log subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_lists_drivers() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        assert!(run(["driverkit", "--root", root, "list"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["driverkit", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_reports_missing_driver_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let err = run(["driverkit", "--root", root, "isolate"]).unwrap_err();
        assert_eq!(err, "No driver specified");
    }
}
