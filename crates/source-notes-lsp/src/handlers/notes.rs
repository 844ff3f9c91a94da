use crate::conversion::note_location_to_lsp_location;
use crate::handlers::{log_to_client, parse_first_arg, report_error, run_session};
use crate::protocol::{CreateNoteParams, NoteIdParams, UpdateNoteParams};
use crate::state::GlobalState;
use serde::Serialize;
use source_notes_core::session::Selection;
use source_notes_core::NotesError;
use tower_lsp::jsonrpc::{Error, ErrorCode, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

fn to_json<T: Serialize>(value: T) -> Result<Option<serde_json::Value>> {
    serde_json::to_value(value).map(Some).map_err(|e| Error {
        code: ErrorCode::InternalError,
        message: format!("Failed to serialize result: {}", e).into(),
        data: None,
    })
}

/// Handle "sourceNotes.createNote" command
/// Arguments: [{ uri, startLine, endLine, text, languageId? }]
pub async fn handle_create_note(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let params: CreateNoteParams = parse_first_arg(&params)?;

    let path = params
        .uri
        .to_file_path()
        .map_err(|_| Error::invalid_params(format!("Not a file URI: {}", params.uri)))?;

    // Prefer the editor's unsaved text over the file on disk
    let cached = state.document_cache.read().await.get(&params.uri).cloned();
    let (cached_text, cached_language) = match cached {
        Some(document) => (Some(document.text), Some(document.language_id)),
        None => (None, None),
    };
    let language = params
        .language_id
        .or(cached_language)
        .unwrap_or_else(|| "plaintext".to_string());

    let fs = state.fs.clone();
    let text = params.text;
    let created = run_session(client, state, move |session| {
        let document = match cached_text {
            Some(document) => document,
            None => fs
                .read_to_string(&path)
                .map_err(|source| NotesError::Read {
                    path: path.clone(),
                    source,
                })?,
        };
        let selection = Selection {
            path,
            text: document,
            start_line: params.start_line,
            end_line: params.end_line,
            language,
        };
        session.create_note(selection, &text)
    })
    .await?;

    match created {
        Some(note) => {
            client
                .show_message(MessageType::INFO, "Note saved successfully")
                .await;
            to_json(note)
        }
        None => Ok(None),
    }
}

/// Handle "sourceNotes.deleteNote" command
/// Arguments: [{ id }]
pub async fn handle_delete_note(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let NoteIdParams { id } = parse_first_arg(&params)?;

    run_session(client, state, move |session| session.delete_note(&id)).await?;

    client.show_message(MessageType::INFO, "Note deleted").await;
    Ok(Some(serde_json::Value::Bool(true)))
}

/// Handle "sourceNotes.viewNote" command
/// Arguments: [{ id }]
/// The note becomes the session's current note
pub async fn handle_view_note(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let NoteIdParams { id } = parse_first_arg(&params)?;

    let note = run_session(client, state, move |session| session.view_note(&id)).await?;
    to_json(note)
}

/// Handle "sourceNotes.updateNote" command
/// Arguments: [{ id, text }]
pub async fn handle_update_note(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let UpdateNoteParams { id, text } = parse_first_arg(&params)?;

    let note_id = id.clone();
    let updated = run_session(client, state, move |session| {
        session.update_note(&note_id, &text)
    })
    .await?;

    match updated {
        Some(note) => to_json(note),
        None => {
            log_to_client(
                client,
                state,
                MessageType::WARNING,
                format!("No note with id {}, nothing updated", id),
            )
            .await;
            Ok(None)
        }
    }
}

/// Handle "sourceNotes.openFile" command
/// Arguments: [{ id }]
/// Returns the Location the client should reveal and select
pub async fn handle_open_file(
    client: &Client,
    state: &GlobalState,
    params: ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    let NoteIdParams { id } = parse_first_arg(&params)?;

    let note_id = id.clone();
    let location = run_session(client, state, move |session| session.locate_note(&note_id)).await?;

    match note_location_to_lsp_location(&location) {
        Some(location) => to_json(location),
        None => Err(report_error(client, NotesError::LocationUnknown(id)).await),
    }
}

/// Handle "sourceNotes.exportMarkdown" command
/// Returns the URI of the written Markdown file
pub async fn handle_export_markdown(
    client: &Client,
    state: &GlobalState,
) -> Result<Option<serde_json::Value>> {
    let path = run_session(client, state, |session| session.export_markdown()).await?;

    client
        .show_message(MessageType::INFO, "Exported markdown content")
        .await;

    let uri = Url::from_file_path(&path).map_err(|_| Error::internal_error())?;
    to_json(uri)
}
