use crate::conversion::note_range;
use crate::protocol::VIEW_NOTE;
use crate::state::GlobalState;
use source_notes_core::tree::NoteNode;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

/// Handle "textDocument/hover"
/// Shows every note covering the hovered line
pub async fn handle_hover(state: &GlobalState, params: HoverParams) -> Result<Option<Hover>> {
    if !state.config.read().await.hover {
        return Ok(None);
    }

    let session_lock = state.session.read().await;
    let Some(session) = session_lock.as_ref() else {
        return Ok(None);
    };

    let position = params.text_document_position_params.position;
    let Ok(path) = params
        .text_document_position_params
        .text_document
        .uri
        .to_file_path()
    else {
        return Ok(None);
    };

    let notes = session.notes_at(&path, position.line);
    let Some(first) = notes.first() else {
        return Ok(None);
    };

    let value = notes
        .iter()
        .map(|note| NoteNode::from_note(note).tooltip)
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    Ok(Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: note_range(first),
    }))
}

/// Handle "textDocument/codeLens"
/// One lens per note, on its first captured line
pub async fn handle_code_lens(
    state: &GlobalState,
    params: CodeLensParams,
) -> Result<Option<Vec<CodeLens>>> {
    if !state.config.read().await.code_lens {
        return Ok(None);
    }

    let session_lock = state.session.read().await;
    let Some(session) = session_lock.as_ref() else {
        return Ok(None);
    };

    let Ok(path) = params.text_document.uri.to_file_path() else {
        return Ok(None);
    };

    let lenses = session
        .inline_notes(&path)
        .into_iter()
        .filter_map(|note| {
            let range = note_range(note)?;
            let title = note.note.lines().next().unwrap_or_default().to_string();
            Some(CodeLens {
                range: Range {
                    start: range.start,
                    end: range.start,
                },
                command: Some(Command {
                    title,
                    command: VIEW_NOTE.to_string(),
                    arguments: Some(vec![serde_json::json!({ "id": note.id })]),
                }),
                data: None,
            })
        })
        .collect();

    Ok(Some(lenses))
}
