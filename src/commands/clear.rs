//! `driverkit clear` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::fileset::{DriverFileset, FilesetLock};

/// Hides every driver.
///
/// # Errors
///
/// Returns [`DriverError::Collision`](crate::error::DriverError::Collision)
/// if quarantine is in the way or the lock is held.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<()> {
    let _lock = FilesetLock::acquire(config.lock_path())?;
    let hidden = DriverFileset::from_config(ctx.fs.as_ref(), config).clear()?;
    if hidden.is_empty() {
        println!("No active drivers.");
    } else {
        println!("Hid {}.", hidden.join(", "));
    }
    Ok(())
}
