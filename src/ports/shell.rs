//! Shell executor port for running operator commands.

/// Runs an external command on behalf of the operator.
///
/// The command inherits the caller's stdio so its output reaches the
/// operator directly; only the exit status comes back.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args`, adding `env` to the inherited environment.
    ///
    /// Returns the exit code, or -1 when the process ended without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    fn run(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>>;
}
