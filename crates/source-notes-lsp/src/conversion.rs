//! Conversion utilities between Core types and LSP types
//!
//! Core counts note lines from 1; LSP positions are 0-based.

use source_notes_core::session::NoteLocation;
use source_notes_core::{Note, NotesError};
use tower_lsp::jsonrpc::{Error, ErrorCode};
use tower_lsp::lsp_types::{Location, Position, Range, Url};

/// Range spanning the captured lines of a note, from the start of the first
/// line to the end of the last
pub fn note_range(note: &Note) -> Option<Range> {
    let first = note.first_line().filter(|n| *n > 0)?;
    let last = note.last_line().filter(|n| *n > 0)?;
    let end_character = note
        .lines
        .last()
        .map(|line| line.content.encode_utf16().count() as u32)
        .unwrap_or(0);

    Some(Range {
        start: Position {
            line: first.min(last) - 1,
            character: 0,
        },
        end: Position {
            line: first.max(last) - 1,
            character: end_character,
        },
    })
}

pub fn note_location_to_lsp_location(location: &NoteLocation) -> Option<Location> {
    let uri = Url::from_file_path(&location.path).ok()?;
    Some(Location {
        uri,
        range: Range {
            start: Position {
                line: location.start_line,
                character: 0,
            },
            end: Position {
                line: location.end_line,
                character: location.end_character,
            },
        },
    })
}

/// Convert a Core error to a JSON-RPC error
pub fn notes_error_to_rpc_error(err: &NotesError) -> Error {
    let code = if err.is_user_error() {
        ErrorCode::InvalidParams
    } else {
        ErrorCode::InternalError
    };

    Error {
        code,
        message: err.to_string().into(),
        data: None,
    }
}
