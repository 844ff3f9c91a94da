use std::path::Path;

use crate::error::{NotesError, Result};
use crate::model::{ExtensionData, Note};
use crate::vfs::FileSystem;

const TICKS: &str = "```";

/// Render every note into one Markdown document.
///
/// Notes are ordered by file, then by first captured line; a `##` heading
/// opens each run of notes for the same file.
pub fn render_markdown(data: &ExtensionData) -> String {
    let mut notes: Vec<&Note> = data.notes().iter().collect();
    notes.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then_with(|| a.first_line().unwrap_or(0).cmp(&b.first_line().unwrap_or(0)))
    });

    let rendered: Vec<String> = notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let show_file = i == 0 || notes[i - 1].file != note.file;
            render_note(note, show_file)
        })
        .collect();

    format!("# Notes\n\n{}", rendered.join("\n"))
}

fn render_note(note: &Note, show_file: bool) -> String {
    let heading = if show_file {
        format!("## `{}`\n\n", note.file)
    } else {
        String::new()
    };
    let start = note.first_line().map(|n| n.to_string()).unwrap_or_default();
    let end = note.last_line().map(|n| n.to_string()).unwrap_or_default();

    format!(
        "{heading}> **Line {start} to {end}**\n\n{TICKS}{language}\n{code}\n{TICKS}\n\n{body}\n",
        language = note.language,
        code = note.code(),
        body = note.note,
    )
}

/// Render and write the export document to `path`
pub fn write_markdown(fs: &dyn FileSystem, path: &Path, data: &ExtensionData) -> Result<()> {
    let markdown = render_markdown(data);
    fs.write(path, &markdown).map_err(|source| NotesError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Exported {} notes to {:?}", data.notes().len(), path);
    Ok(())
}
