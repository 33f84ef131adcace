//! `driverkit restore` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::fileset::{DriverFileset, FilesetLock};

/// Moves every hidden driver back.
///
/// # Errors
///
/// Returns [`DriverError::Collision`](crate::error::DriverError::Collision)
/// if an active driver has the same name as a hidden one or the lock is held.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<()> {
    let _lock = FilesetLock::acquire(config.lock_path())?;
    let restored = DriverFileset::from_config(ctx.fs.as_ref(), config).restore()?;
    if restored.is_empty() {
        println!("Nothing to restore.");
    } else {
        println!("Restored {}.", restored.join(", "));
    }
    Ok(())
}
