use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = NotesError> = std::result::Result<T, E>;

/// Everything a note operation can fail with.
///
/// Unknown ids are only an error when the store runs in strict mode,
/// or when a command needs the note itself (view, open).
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("Workspace not found")]
    WorkspaceNotFound,

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error saving {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode note document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("Note location not known: {0}")]
    LocationUnknown(String),

    #[error("invalid selection {start}..={end} in a document of {line_count} lines")]
    InvalidSelection {
        start: usize,
        end: usize,
        line_count: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl NotesError {
    /// Errors caused by the caller's input rather than the workspace state.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            NotesError::NotFound(_)
                | NotesError::LocationUnknown(_)
                | NotesError::InvalidSelection { .. }
        )
    }
}
