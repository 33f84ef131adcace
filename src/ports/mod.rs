//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the driver core and the host
//! environment (filesystem, process execution, module loading).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod loader;
pub mod shell;

pub use filesystem::FileSystem;
pub use loader::{ModuleDefinition, ModuleLoader};
pub use shell::ShellExecutor;
