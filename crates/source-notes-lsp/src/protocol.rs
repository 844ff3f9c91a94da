use serde::{Deserialize, Serialize};
use source_notes_core::TreeNode;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::Url;

pub const CREATE_NOTE: &str = "sourceNotes.createNote";
pub const DELETE_NOTE: &str = "sourceNotes.deleteNote";
pub const VIEW_NOTE: &str = "sourceNotes.viewNote";
pub const UPDATE_NOTE: &str = "sourceNotes.updateNote";
pub const OPEN_FILE: &str = "sourceNotes.openFile";
pub const EXPORT_MARKDOWN: &str = "sourceNotes.exportMarkdown";

pub const COMMANDS: [&str; 6] = [
    CREATE_NOTE,
    DELETE_NOTE,
    VIEW_NOTE,
    UPDATE_NOTE,
    OPEN_FILE,
    EXPORT_MARKDOWN,
];

/// Custom request returning the whole notes tree
pub const GET_TREE: &str = "sourceNotes/getTree";

/// Arguments of `sourceNotes.createNote`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteParams {
    pub uri: Url,
    /// 0-based, inclusive
    pub start_line: usize,
    /// 0-based, inclusive
    pub end_line: usize,
    pub text: String,
    /// Falls back to the languageId sent in didOpen
    pub language_id: Option<String>,
}

/// Arguments of the commands that only need a note id
#[derive(Debug, Serialize, Deserialize)]
pub struct NoteIdParams {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNoteParams {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTreeResult {
    pub roots: Vec<TreeNode>,
}

/// Server → client: the tree changed, re-query from the root
pub enum TreeChanged {}

impl Notification for TreeChanged {
    type Params = ();
    const METHOD: &'static str = "sourceNotes/treeChanged";
}
