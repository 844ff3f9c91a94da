use std::path::Path;

/// Abstract interface for file system operations.
pub trait FileSystem: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Replace the contents of a file, creating it if needed.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Create a directory and its parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Standard implementation of FileSystem using std::fs.
pub struct PhysicalFileSystem;

impl FileSystem for PhysicalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
