pub mod id;
pub mod time;

use std::path::Path;

/// Turn a file path into the workspace-relative, `/`-separated form
/// stored in `Note::file`.
///
/// Paths outside `root` stay absolute.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use source_notes_core::normalize_relative_path;
///
/// let root = Path::new("/work/project");
/// assert_eq!(normalize_relative_path(root, Path::new("/work/project/src/main.rs")), "src/main.rs");
/// assert_eq!(normalize_relative_path(root, Path::new("/work/project/lib.rs")), "lib.rs");
/// assert_eq!(normalize_relative_path(root, Path::new("/elsewhere/lib.rs")), "/elsewhere/lib.rs");
/// ```
pub fn normalize_relative_path(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return to_forward_slashes(path);
    };
    to_forward_slashes(relative)
}

fn to_forward_slashes(path: &Path) -> String {
    let s = path.to_string_lossy().to_string();
    if std::path::MAIN_SEPARATOR == '\\' {
        s.replace('\\', "/")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_relative_path() {
        let root = Path::new("/ws");
        assert_eq!(normalize_relative_path(root, Path::new("/ws/a/b/c.ts")), "a/b/c.ts");
        assert_eq!(normalize_relative_path(root, Path::new("/ws/d.ts")), "d.ts");
        assert_eq!(normalize_relative_path(root, Path::new("/other/e.ts")), "/other/e.ts");
        assert!(Path::new(&normalize_relative_path(root, Path::new("/other/e.ts"))).is_absolute());
    }
}
