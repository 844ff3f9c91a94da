use crate::handlers::log_to_client;
use crate::state::{GlobalState, OpenDocument};
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "textDocument/didOpen" notification
pub async fn handle_did_open(state: &GlobalState, params: DidOpenTextDocumentParams) {
    let document = params.text_document;
    let mut cache = state.document_cache.write().await;
    cache.insert(
        document.uri,
        OpenDocument {
            text: document.text,
            language_id: document.language_id,
        },
    );
}

/// Handle "textDocument/didChange" notification (full sync)
pub async fn handle_did_change(state: &GlobalState, params: DidChangeTextDocumentParams) {
    let Some(last_change) = params.content_changes.into_iter().last() else {
        return;
    };

    let mut cache = state.document_cache.write().await;
    match cache.get_mut(&params.text_document.uri) {
        Some(document) => document.text = last_change.text,
        None => {
            cache.insert(
                params.text_document.uri,
                OpenDocument {
                    text: last_change.text,
                    language_id: "plaintext".to_string(),
                },
            );
        }
    }
}

/// Handle "textDocument/didClose" notification
pub async fn handle_did_close(state: &GlobalState, params: DidCloseTextDocumentParams) {
    let mut cache = state.document_cache.write().await;
    cache.remove(&params.text_document.uri);
}

/// Handle "workspace/didChangeWatchedFiles" notification
/// Reloads the notes when the note document is edited outside the server
pub async fn handle_did_change_watched_files(
    client: &Client,
    state: &GlobalState,
    params: DidChangeWatchedFilesParams,
) {
    let mut session_lock = state.session.clone().write_owned().await;
    let Some(session) = session_lock.as_ref() else {
        return;
    };

    let document_path = session.store().document_path();
    let touched = params
        .changes
        .iter()
        .filter_map(|change| change.uri.to_file_path().ok())
        .any(|path| path == document_path);

    if !touched {
        return;
    }

    let reloaded = tokio::task::spawn_blocking(move || match session_lock.as_mut() {
        Some(session) => session.reload(),
        None => Ok(()),
    })
    .await;

    let message = match reloaded {
        Ok(Ok(())) => return,
        Ok(Err(e)) => format!("Failed to reload notes: {}", e),
        Err(e) => format!("Reload task failed: {}", e),
    };
    log_to_client(client, state, MessageType::ERROR, message).await;
}
