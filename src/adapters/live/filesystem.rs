//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Filesystem port over the real disk.
///
/// Directory listings are sorted by name, which is what makes driver
/// discovery order deterministic.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> PortResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> PortResult<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    // A dangling symlink still occupies its name, so rename targets count it.
    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> PortResult<Vec<String>> {
        let mut names = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|name| match name.into_string() {
                Ok(name) => Some(name),
                Err(raw) => {
                    tracing::debug!(
                        dir = %path.display(),
                        entry = ?raw,
                        "skipping non-UTF-8 entry"
                    );
                    None
                }
            })
            .collect::<Vec<_>>();
        names.sort_unstable();
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> PortResult<()> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn rename(&self, from: &Path, to: &Path) -> PortResult<()> {
        Ok(std::fs::rename(from, to)?)
    }
}
