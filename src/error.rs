//! Error type shared by every driverkit operation.

use std::path::PathBuf;

/// Failures reported by registry scans, path installation, module mixing,
/// fileset moves and the CLI commands built on them.
///
/// None of these are transient: they describe operator input or repository
/// state, so callers report them and never retry.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The drivers root (or another configured location) is unusable.
    #[error("{0}")]
    Configuration(String),

    /// A required argument was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// A referenced driver does not exist in the active root.
    #[error("Driver {0:?} not found")]
    NotFound(String),

    /// A discovered module file does not define the module its name promises.
    #[error("expected {path} to define {expected}")]
    Resolution {
        /// The conventionally derived module name.
        expected: String,
        /// The file that was loaded.
        path: PathBuf,
    },

    /// An operation would overwrite existing state.
    #[error("{0}")]
    Collision(String),

    /// The config file exists but could not be parsed.
    #[error("invalid config {path}: {message}")]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The module loader failed to read or evaluate a module file.
    #[error("failed to load {path}: {message}")]
    Loader {
        /// Path of the module file.
        path: PathBuf,
        /// Loader message.
        message: String,
    },

    /// A command run on behalf of the operator exited unsuccessfully.
    #[error("command `{command}` exited with status {code}")]
    CommandFailed {
        /// The command line as given.
        command: String,
        /// Exit code, or -1 when the process was killed by a signal.
        code: i32,
    },

    /// Underlying filesystem failure.
    #[error("{path}: {source}")]
    Io {
        /// Path the operation touched.
        path: PathBuf,
        /// The port error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DriverError>;

impl DriverError {
    /// Wraps a port error with the path it concerned.
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Io { path: path.into(), source }
    }
}
