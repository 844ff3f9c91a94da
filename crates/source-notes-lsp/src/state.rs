use std::collections::HashMap;
use std::sync::Arc;

use source_notes_core::vfs::FileSystem;
use source_notes_core::Session;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::{Mutex, RwLock};
use tower_lsp::lsp_types::Url;

use crate::config::LspSettings;

/// Latest known state of a document open in the client
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub text: String,
    pub language_id: String,
}

/// Global state for LSP server
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// Note session of the open workspace, `None` before initialize
    /// or when the client has no workspace root
    pub session: Arc<RwLock<Option<Session>>>,

    /// Open documents, used to capture note lines
    pub document_cache: Arc<RwLock<HashMap<Url, OpenDocument>>>,

    pub config: Arc<RwLock<LspSettings>>,

    pub fs: Arc<dyn FileSystem>,

    /// Fired by the session's tree listener on every rebuild
    pub tree_events: UnboundedSender<()>,

    /// Taken once by the tree notifier task
    pub tree_receiver: Arc<Mutex<Option<UnboundedReceiver<()>>>>,
}

impl GlobalState {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        let (tree_events, tree_receiver) = unbounded_channel();
        Self {
            session: Arc::new(RwLock::new(None)),
            document_cache: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(RwLock::new(LspSettings::default())),
            fs,
            tree_events,
            tree_receiver: Arc::new(Mutex::new(Some(tree_receiver))),
        }
    }
}
