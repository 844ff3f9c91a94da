//! Source Notes LSP Library
//!
//! LSP protocol layer, converts JSON-RPC requests to Core session calls.

use std::sync::Arc;

use source_notes_core::vfs::{FileSystem, PhysicalFileSystem};
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LspService};

use crate::protocol::GetTreeResult;
use crate::state::GlobalState;

mod config;
mod conversion;
mod handlers;
mod notifier;
pub mod protocol;
mod state;

/// LSP backend implementation
pub struct Backend {
    client: Client,
    state: GlobalState,
}

impl Backend {
    pub fn new(client: Client, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            client,
            state: GlobalState::new(fs),
        }
    }

    /// "sourceNotes/getTree"
    async fn get_tree(&self) -> Result<GetTreeResult> {
        handlers::handle_get_tree(&self.state).await
    }
}

#[tower_lsp::async_trait]
impl tower_lsp::LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::handle_initialize(&self.client, &self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handlers::handle_initialized(&self.client, &self.state).await;
    }

    async fn shutdown(&self) -> Result<()> {
        log::info!("Shutdown requested");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::handle_did_open(&self.state, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::handle_did_change(&self.state, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::handle_did_close(&self.state, params).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::handle_did_change_configuration(&self.client, &self.state, params).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::handle_did_change_watched_files(&self.client, &self.state, params).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        handlers::handle_hover(&self.state, params).await
    }

    async fn code_lens(&self, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
        handlers::handle_code_lens(&self.state, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        log::info!("Executing command {}", params.command);

        match params.command.as_str() {
            protocol::CREATE_NOTE => {
                handlers::handle_create_note(&self.client, &self.state, params).await
            }
            protocol::DELETE_NOTE => {
                handlers::handle_delete_note(&self.client, &self.state, params).await
            }
            protocol::VIEW_NOTE => {
                handlers::handle_view_note(&self.client, &self.state, params).await
            }
            protocol::UPDATE_NOTE => {
                handlers::handle_update_note(&self.client, &self.state, params).await
            }
            protocol::OPEN_FILE => {
                handlers::handle_open_file(&self.client, &self.state, params).await
            }
            protocol::EXPORT_MARKDOWN => {
                handlers::handle_export_markdown(&self.client, &self.state).await
            }
            other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
        }
    }
}

/// Create and return LSP service and client socket
pub fn create_lsp_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    let fs: Arc<dyn FileSystem> = Arc::new(PhysicalFileSystem);
    LspService::build(|client| Backend::new(client, fs))
        .custom_method(protocol::GET_TREE, Backend::get_tree)
        .finish()
}
