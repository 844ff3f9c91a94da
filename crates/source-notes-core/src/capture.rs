use crate::error::{NotesError, Result};
use crate::model::{Line, Note};
use crate::utils::{id::generate_id, time::now_iso8601};

/// Snapshot the selected lines of a document.
///
/// `start_line` and `end_line` are 0-based and inclusive (editor coordinates);
/// the captured `num` values are 1-based. A reversed selection is normalised.
pub fn capture_lines(text: &str, start_line: usize, end_line: usize) -> Result<Vec<Line>> {
    let (start, end) = if start_line <= end_line {
        (start_line, end_line)
    } else {
        (end_line, start_line)
    };

    let document: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if end >= document.len() {
        return Err(NotesError::InvalidSelection {
            start,
            end,
            line_count: document.len(),
        });
    }

    Ok(document[start..=end]
        .iter()
        .enumerate()
        .map(|(offset, content)| Line::new((start + offset + 1) as u32, *content))
        .collect())
}

/// A note about to be created from an editor selection
#[derive(Debug, Clone)]
pub struct NoteDraft {
    /// Workspace-relative, `/` separated
    pub file: String,
    pub lines: Vec<Line>,
    pub text: String,
    pub language: String,
}

impl NoteDraft {
    /// Assign a fresh id and creation time
    pub fn into_note(self) -> Note {
        Note {
            id: generate_id(),
            file: self.file,
            lines: self.lines,
            note: self.text,
            language: self.language,
            created: now_iso8601(),
        }
    }
}
