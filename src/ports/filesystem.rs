//! Filesystem port for scans, reads, writes and directory moves.

use std::path::Path;

/// Provides filesystem access for driver discovery and fileset moves.
///
/// Abstracting the filesystem keeps registry scans and path installation
/// testable without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a directory and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component exists as a file or cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Moves `from` to `to` with rename semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing or the rename is refused.
    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
