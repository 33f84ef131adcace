//! `driverkit scoped` and `driverkit unscoped` commands.
//!
//! Both narrow the active drivers, run an operator command, then restore
//! unconditionally. The fileset lock is held across all three steps.

use crate::config::{Config, SCOPED_DRIVER_ENV};
use crate::context::ServiceContext;
use crate::error::{DriverError, Result};
use crate::fileset::{DriverFileset, FilesetLock};
use crate::registry::driver_name;

/// Runs `command` with only driver `name` active.
///
/// The child sees the driver name in `DRIVERKIT_SCOPED_DRIVER`.
///
/// # Errors
///
/// Returns [`DriverError::Validation`] for a name that is not a plain
/// driver directory name, isolate errors, [`DriverError::CommandFailed`] for a non-zero
/// exit and any restore error (which takes precedence).
pub fn run_scoped(
    ctx: &ServiceContext,
    config: &Config,
    name: &str,
    command: &[String],
) -> Result<()> {
    let name = driver_name(name)?;
    let env = [(SCOPED_DRIVER_ENV.to_string(), name.to_string())];
    run_narrowed(ctx, config, command, &env, |fileset| fileset.isolate(name))
}

/// Runs `command` with no drivers active.
///
/// # Errors
///
/// As [`run_scoped`], with clear errors in place of isolate errors.
pub fn run_unscoped(ctx: &ServiceContext, config: &Config, command: &[String]) -> Result<()> {
    run_narrowed(ctx, config, command, &[], |fileset| fileset.clear())
}

fn run_narrowed(
    ctx: &ServiceContext,
    config: &Config,
    command: &[String],
    env: &[(String, String)],
    narrow: impl FnOnce(&DriverFileset<'_>) -> Result<Vec<String>>,
) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(DriverError::Validation("No command given".into()));
    };
    let _lock = FilesetLock::acquire(config.lock_path())?;
    let fileset = DriverFileset::from_config(ctx.fs.as_ref(), config);

    let hidden = narrow(&fileset)?;
    tracing::debug!(hidden = ?hidden, program = %program, "running narrowed command");

    let outcome = ctx.shell.run(program, args, env);
    fileset.restore()?;

    let code = outcome.map_err(|e| DriverError::io(program, e))?;
    if code != 0 {
        return Err(DriverError::CommandFailed { command: command.join(" "), code });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::adapters::live::loader::SourceScanLoader;
    use crate::ports::shell::ShellExecutor;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(Vec<String>, Vec<(String, String)>, Vec<String>)>>>;

    /// Records the command, its env, and which drivers were active while it ran.
    struct RecordingShell {
        drivers_root: PathBuf,
        seen: Seen,
        code: i32,
    }

    impl ShellExecutor for RecordingShell {
        fn run(
            &self,
            program: &str,
            args: &[String],
            env: &[(String, String)],
        ) -> std::result::Result<i32, Box<dyn std::error::Error + Send + Sync>> {
            let mut active: Vec<String> = std::fs::read_dir(&self.drivers_root)?
                .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
                .collect::<std::result::Result<_, _>>()?;
            active.sort();
            let mut line = vec![program.to_string()];
            line.extend(args.iter().cloned());
            self.seen.lock().unwrap().push((line, env.to_vec(), active));
            Ok(self.code)
        }
    }

    fn setup(code: i32) -> (tempfile::TempDir, Config, ServiceContext, Seen) {
        let dir = tempfile::tempdir().unwrap();
        for name in ["alpha", "beta"] {
            std::fs::create_dir_all(dir.path().join("drivers").join(name)).unwrap();
        }
        let config = Config::new(dir.path());
        let seen = Seen::default();
        let ctx = ServiceContext::with_adapters(
            Box::new(LiveFileSystem),
            Box::new(RecordingShell {
                drivers_root: config.drivers_root(),
                seen: seen.clone(),
                code,
            }),
            Box::new(SourceScanLoader::new(LiveFileSystem)),
        );
        (dir, config, ctx, seen)
    }

    fn cmd(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn scoped_runs_with_one_driver_and_restores() {
        let (dir, config, ctx, seen) = setup(0);
        run_scoped(&ctx, &config, "alpha", &cmd(&["rake", "-T"])).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, ["rake", "-T"]);
        assert_eq!(seen[0].1, [(SCOPED_DRIVER_ENV.to_string(), "alpha".to_string())]);
        assert_eq!(seen[0].2, ["alpha"]);
        assert!(dir.path().join("drivers/beta").is_dir());
    }

    #[test]
    fn unscoped_runs_with_no_drivers_and_restores() {
        let (dir, config, ctx, seen) = setup(0);
        run_unscoped(&ctx, &config, &cmd(&["true"])).unwrap();

        let seen = seen.lock().unwrap();
        assert!(seen[0].1.is_empty());
        assert!(seen[0].2.is_empty());
        assert!(dir.path().join("drivers/alpha").is_dir());
        assert!(dir.path().join("drivers/beta").is_dir());
    }

    #[test]
    fn failing_command_still_restores() {
        let (dir, config, ctx, _seen) = setup(3);
        let err = run_scoped(&ctx, &config, "beta", &cmd(&["rspec"])).unwrap_err();
        assert!(matches!(err, DriverError::CommandFailed { code: 3, .. }));
        assert!(dir.path().join("drivers/alpha").is_dir());
    }

    #[test]
    fn unknown_driver_runs_nothing() {
        let (_dir, config, ctx, seen) = setup(0);
        let err = run_scoped(&ctx, &config, "gamma", &cmd(&["true"])).unwrap_err();
        assert!(matches!(err, DriverError::NotFound(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn name_is_trimmed_like_isolate() {
        let (_dir, config, ctx, seen) = setup(0);
        run_scoped(&ctx, &config, " alpha ", &cmd(&["true"])).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].1, [(SCOPED_DRIVER_ENV.to_string(), "alpha".to_string())]);
        assert_eq!(seen[0].2, ["alpha"]);
    }

    #[test]
    fn path_like_name_runs_nothing_and_moves_nothing() {
        let (dir, config, ctx, seen) = setup(0);
        for name in ["..", ".", "alpha/app"] {
            let err = run_scoped(&ctx, &config, name, &cmd(&["true"])).unwrap_err();
            assert!(matches!(err, DriverError::Validation(_)), "{name:?}");
        }
        assert!(seen.lock().unwrap().is_empty());
        assert!(dir.path().join("drivers/alpha").is_dir());
        assert!(dir.path().join("drivers/beta").is_dir());
    }

    #[test]
    fn empty_command_is_rejected() {
        let (_dir, config, ctx, _seen) = setup(0);
        let err = run_unscoped(&ctx, &config, &[]).unwrap_err();
        assert!(matches!(err, DriverError::Validation(_)));
    }
}
