//! Command dispatch and handlers.

pub mod clear;
pub mod generate;
pub mod isolate;
pub mod list;
pub mod mixins;
pub mod paths;
pub mod restore;
pub mod scoped;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command line to its handler against the live context.
///
/// # Errors
///
/// Returns the handler's error rendered as a string.
pub fn dispatch(cli: &Cli) -> std::result::Result<(), String> {
    let ctx = ServiceContext::live();
    let config = load_config(&ctx, cli).map_err(|e| e.to_string())?;
    execute(&cli.command, &ctx, &config).map_err(|e| e.to_string())
}

/// Builds the effective config: file, then environment, then flags.
///
/// # Errors
///
/// Returns a config error if `config/drivers.yml` is malformed.
pub fn load_config(ctx: &ServiceContext, cli: &Cli) -> Result<Config> {
    let config = Config::load(ctx.fs.as_ref(), &cli.root)?
        .with_process_env()
        .with_drivers_path(cli.drivers_path.clone());
    tracing::debug!(
        drivers_root = %config.drivers_root().display(),
        quarantine_root = %config.quarantine_root().display(),
        "resolved config"
    );
    Ok(config)
}

/// Runs `command` with an explicit context and config.
///
/// # Errors
///
/// Returns whatever the selected handler returns.
pub fn execute(command: &Command, ctx: &ServiceContext, config: &Config) -> Result<()> {
    match command {
        Command::Generate { name } => generate::run(ctx, config, name),
        Command::Isolate { name } => isolate::run(ctx, config, name.as_deref()),
        Command::Clear => clear::run(ctx, config),
        Command::Restore => restore::run(ctx, config),
        Command::Scoped { name, command } => scoped::run_scoped(ctx, config, name, command),
        Command::Unscoped { command } => scoped::run_unscoped(ctx, config, command),
        Command::List => list::run(ctx, config),
        Command::Paths { json } => paths::run(ctx, config, *json),
        Command::Mixins { type_name, kind, source, json } => mixins::run(
            ctx,
            config,
            &mixins::Request {
                type_name,
                kind: (*kind).into(),
                source: source.as_deref(),
                json: *json,
            },
        ),
    }
}
