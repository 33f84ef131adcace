//! Live shell executor using `std::process::Command`.

use std::process::Command;

use crate::ports::shell::ShellExecutor;

/// Live executor that spawns the command with inherited stdio.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let status = Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()?;
        Ok(status.code().unwrap_or(-1))
    }
}
