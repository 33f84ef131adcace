//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::mixin::MixinKind;

/// Top-level CLI parser for `driverkit`.
#[derive(Debug, Parser)]
#[command(
    name = "driverkit",
    version,
    about = "Manage self-contained driver directories inside an application"
)]
pub struct Cli {
    /// Application root.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Drivers directory relative to the root (overrides config and env).
    #[arg(long, global = true)]
    pub drivers_path: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scaffold a new driver.
    Generate {
        /// Driver name; normalized to snake_case.
        name: String,
    },
    /// Hide every driver except one.
    Isolate {
        /// Driver to keep active.
        name: Option<String>,
    },
    /// Hide every driver.
    Clear,
    /// Bring back every hidden driver.
    Restore,
    /// Run a command with only one driver active, then restore.
    Scoped {
        /// Driver to keep active.
        name: String,
        /// Command and arguments to run.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },
    /// Run a command with no drivers active, then restore.
    Unscoped {
        /// Command and arguments to run.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },
    /// List active and hidden drivers.
    List,
    /// Print the search paths bootstrap would install.
    Paths {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Resolve extension or override modules for a type.
    Mixins {
        /// Fully qualified type name, e.g. `Product` or `Admin::Report`.
        type_name: String,
        /// Which kind of module to mix in.
        #[arg(long, value_enum, default_value_t = KindArg::Extension)]
        kind: KindArg,
        /// Source file declaring the type, used for shadow detection.
        #[arg(long)]
        source: Option<PathBuf>,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// `--kind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// `<type>_extension` modules.
    Extension,
    /// `<type>_override` modules.
    Override,
}

impl From<KindArg> for MixinKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Extension => Self::Extension,
            KindArg::Override => Self::Override,
        }
    }
}
