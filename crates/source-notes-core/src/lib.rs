//! Source Notes Core Library
//!
//! Note persistence, tree construction, selection capture and export.
//! The only IO is the workspace note document, reached through [`vfs::FileSystem`].

pub mod capture;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod session;
pub mod store;
pub mod tree;
pub mod utils;
pub mod vfs;

pub use config::SourceNotesConfig;
pub use error::{NotesError, Result};
pub use model::{ExtensionData, Line, Note};
pub use session::Session;
pub use store::NoteStore;
pub use tree::{NoteTree, TreeNode};
pub use utils::normalize_relative_path;
