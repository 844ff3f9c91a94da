use crate::handlers::log_to_client;
use crate::notifier::TreeNotifier;
use crate::protocol::COMMANDS;
use crate::state::GlobalState;
use source_notes_core::Session;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Workspace root from `rootUri`, or the first workspace folder
fn workspace_root(params: &InitializeParams) -> Option<std::path::PathBuf> {
    params
        .root_uri
        .as_ref()
        .or_else(|| {
            params
                .workspace_folders
                .as_ref()
                .and_then(|folders| folders.first())
                .map(|folder| &folder.uri)
        })
        .and_then(|uri| uri.to_file_path().ok())
}

/// Handle "initialize" request
pub async fn handle_initialize(
    client: &Client,
    state: &GlobalState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    if let Some(root_path) = workspace_root(&params) {
        log_to_client(
            client,
            state,
            MessageType::INFO,
            format!("Initializing workspace at: {:?}", root_path),
        )
        .await;

        let fs = state.fs.clone();
        let opened = tokio::task::spawn_blocking(move || Session::open(root_path, fs))
            .await
            .map_err(|e| Error {
                code: ErrorCode::InternalError,
                message: format!("Failed to initialize workspace: {}", e).into(),
                data: None,
            })?;

        match opened {
            Ok(mut session) => {
                let tree_events = state.tree_events.clone();
                session.tree_mut().subscribe(move || {
                    let _ = tree_events.send(());
                });

                log_to_client(
                    client,
                    state,
                    MessageType::INFO,
                    format!(
                        "Loaded {} notes from {:?}",
                        session.tree().notes().len(),
                        session.store().document_path()
                    ),
                )
                .await;

                let mut session_lock = state.session.write().await;
                *session_lock = Some(session);
            }
            Err(e) => {
                // Keep the server alive; commands report the missing session
                client
                    .show_message(
                        MessageType::ERROR,
                        format!("Source Notes could not load the workspace: {}", e),
                    )
                    .await;
            }
        }
    } else {
        log_to_client(
            client,
            state,
            MessageType::WARNING,
            "No workspace root provided, notes are disabled",
        )
        .await;
    }

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            code_lens_provider: Some(CodeLensOptions {
                resolve_provider: Some(false),
            }),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "source-notes".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handle "initialized" notification: start forwarding tree changes
pub async fn handle_initialized(client: &Client, state: &GlobalState) {
    let receiver = state.tree_receiver.lock().await.take();
    if let Some(receiver) = receiver {
        tokio::spawn(TreeNotifier::new(client.clone(), receiver).start());
    }

    log_to_client(
        client,
        state,
        MessageType::INFO,
        "Client initialized, ready to accept requests",
    )
    .await;
}
