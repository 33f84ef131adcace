//! Service context bundling all port trait objects.

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::loader::SourceScanLoader;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::ports::filesystem::FileSystem;
use crate::ports::loader::ModuleLoader;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter implementations.
pub struct ServiceContext {
    /// Filesystem for scans, reads, writes and moves.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor for operator commands.
    pub shell: Box<dyn ShellExecutor>,
    /// Loader for extension and override module files.
    pub loader: Box<dyn ModuleLoader>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk and processes.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            loader: Box::new(SourceScanLoader::new(LiveFileSystem)),
        }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn with_adapters(
        fs: Box<dyn FileSystem>,
        shell: Box<dyn ShellExecutor>,
        loader: Box<dyn ModuleLoader>,
    ) -> Self {
        Self { fs, shell, loader }
    }
}
