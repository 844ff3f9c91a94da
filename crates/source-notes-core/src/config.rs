use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vfs::FileSystem;

/// Workspace-relative location of the optional config file
pub const CONFIG_FILE: &str = ".vscode/source-notes.yaml";

/// Top-level configuration for Source Notes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceNotesConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the note document lives and how unknown ids are handled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the note document (relative to workspace root)
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Fail update/remove of unknown ids instead of silently saving
    #[serde(default)]
    pub strict_ids: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Markdown export file (relative to workspace root)
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".vscode")
}

fn default_file_name() -> String {
    "source-notes.json".to_string()
}

fn default_export_file_name() -> String {
    "source-notes-all-notes-export.md".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_name: default_file_name(),
            strict_ids: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

impl SourceNotesConfig {
    /// Load config from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read `.vscode/source-notes.yaml` under `root`, falling back to defaults
    /// when the file is missing or empty.
    pub fn load(root: &Path, fs: &dyn FileSystem) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !fs.exists(&path) {
            return Ok(Self::default());
        }

        let content = fs
            .read_to_string(&path)
            .map_err(|source| crate::NotesError::Read {
                path: path.clone(),
                source,
            })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        log::debug!("Loaded configuration from {:?}", path);
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::PhysicalFileSystem;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SourceNotesConfig::default();
        assert_eq!(config.store.directory, PathBuf::from(".vscode"));
        assert_eq!(config.store.file_name, "source-notes.json");
        assert!(!config.store.strict_ids);
        assert_eq!(config.export.file_name, "source-notes-all-notes-export.md");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SourceNotesConfig::from_yaml("store:\n  strict_ids: true\n").unwrap();
        assert!(config.store.strict_ids);
        assert_eq!(config.store.file_name, "source-notes.json");
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = SourceNotesConfig::load(temp_dir.path(), &PhysicalFileSystem).unwrap();
        assert_eq!(config, SourceNotesConfig::default());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join(".vscode")).unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "store: [unclosed").unwrap();

        let result = SourceNotesConfig::load(temp_dir.path(), &PhysicalFileSystem);
        assert!(matches!(result, Err(crate::NotesError::Config(_))));
    }
}
