//! `driverkit generate` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::generate::DriverGenerator;

/// Scaffolds driver `name` under the drivers root and lists what was written.
///
/// # Errors
///
/// Returns generator errors (blank name, existing driver, write failure).
pub fn run(ctx: &ServiceContext, config: &Config, name: &str) -> Result<()> {
    let files = DriverGenerator::new(ctx.fs.as_ref(), config.drivers_root()).generate(name)?;
    for file in &files {
        let shown = file.strip_prefix(&config.app_root).unwrap_or(file);
        println!("      create  {}", shown.display());
    }
    Ok(())
}
