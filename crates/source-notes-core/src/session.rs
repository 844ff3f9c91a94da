use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::capture::{capture_lines, NoteDraft};
use crate::config::SourceNotesConfig;
use crate::error::{NotesError, Result};
use crate::export;
use crate::model::{ExtensionData, Note};
use crate::store::NoteStore;
use crate::tree::NoteTree;
use crate::utils::normalize_relative_path;
use crate::vfs::FileSystem;

/// An editor selection a note is being created from
#[derive(Debug, Clone)]
pub struct Selection {
    /// Absolute path of the document
    pub path: PathBuf,
    /// Full document text at the time of the command
    pub text: String,
    /// 0-based, inclusive
    pub start_line: usize,
    /// 0-based, inclusive
    pub end_line: usize,
    pub language: String,
}

/// Lines highlighted while a note is being saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub path: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
}

/// Where a note points in the workspace (0-based lines, inclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLocation {
    pub path: PathBuf,
    pub start_line: u32,
    pub end_line: u32,
    /// Length of the last captured line in UTF-16 code units
    pub end_character: u32,
}

/// Per-workspace state shared by every note command.
///
/// Owns the store, the cached tree, the note open in the editor panel
/// and the selection highlight of a note being created.
pub struct Session {
    config: SourceNotesConfig,
    fs: Arc<dyn FileSystem>,
    store: NoteStore,
    tree: NoteTree,
    current_note: Option<Note>,
    highlight: Option<Highlight>,
}

impl Session {
    /// Load configuration and notes for the workspace at `root`
    pub fn open(root: PathBuf, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let config = SourceNotesConfig::load(&root, &*fs)?;
        let store = NoteStore::new(root, config.store.clone(), fs.clone());
        let (data, path) = store.load()?;
        log::info!("Loaded {} notes from {:?}", data.notes().len(), path);

        Ok(Self {
            config,
            fs,
            tree: NoteTree::new(&data),
            store,
            current_note: None,
            highlight: None,
        })
    }

    /// Like [`Session::open`], but without a workspace root there is nothing to open
    pub fn open_workspace(root: Option<PathBuf>, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let root = root.ok_or(NotesError::WorkspaceNotFound)?;
        Self::open(root, fs)
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    pub fn config(&self) -> &SourceNotesConfig {
        &self.config
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn tree(&self) -> &NoteTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut NoteTree {
        &mut self.tree
    }

    pub fn current_note(&self) -> Option<&Note> {
        self.current_note.as_ref()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Workspace-relative form of an absolute document path
    pub fn relative_file(&self, path: &Path) -> String {
        normalize_relative_path(self.root(), path)
    }

    /// Re-read the document from disk and rebuild the tree
    pub fn reload(&mut self) -> Result<()> {
        let (data, _) = self.store.load()?;
        self.refresh(data);
        Ok(())
    }

    /// Save a new note for `selection`.
    ///
    /// Blank text creates nothing. The created note becomes the current note.
    pub fn create_note(&mut self, selection: Selection, text: &str) -> Result<Option<Note>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let lines = capture_lines(&selection.text, selection.start_line, selection.end_line)?;
        self.highlight = Some(Highlight {
            path: selection.path.clone(),
            start_line: selection.start_line,
            end_line: selection.end_line,
        });

        let note = NoteDraft {
            file: self.relative_file(&selection.path),
            lines,
            text: text.to_string(),
            language: selection.language,
        }
        .into_note();

        let data = self.store.append(note)?;
        self.highlight = None;

        let created = data.notes().last().cloned();
        self.refresh(data);
        if let Some(note) = &created {
            log::info!("Note saved successfully: {} ({})", note.id, note.file);
            self.current_note = Some(note.clone());
        }
        Ok(created)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<()> {
        let data = self.store.remove(id)?;
        if self.current_note.as_ref().is_some_and(|note| note.id == id) {
            self.current_note = None;
        }
        self.refresh(data);
        log::info!("Note deleted: {}", id);
        Ok(())
    }

    /// Make the note with `id` the current note
    pub fn view_note(&mut self, id: &str) -> Result<Note> {
        let note = self
            .store
            .find(id)?
            .ok_or_else(|| NotesError::NotFound(id.to_string()))?;
        self.current_note = Some(note.clone());
        Ok(note)
    }

    /// Replace the text of a note; `None` when no note has `id`
    pub fn update_note(&mut self, id: &str, text: &str) -> Result<Option<Note>> {
        let data = self.store.update(id, text)?;
        let updated = data.find(id).cloned();
        if let Some(note) = &updated {
            if self.current_note.as_ref().is_some_and(|current| current.id == id) {
                self.current_note = Some(note.clone());
            }
        }
        self.refresh(data);
        Ok(updated)
    }

    /// Resolve the file and line range a note was captured from
    pub fn locate_note(&self, id: &str) -> Result<NoteLocation> {
        let note = self
            .store
            .find(id)?
            .ok_or_else(|| NotesError::NotFound(id.to_string()))?;

        let (Some(first), Some(last)) = (note.first_line(), note.last_line()) else {
            return Err(NotesError::LocationUnknown(id.to_string()));
        };
        if note.file.is_empty() || first == 0 || last == 0 {
            return Err(NotesError::LocationUnknown(id.to_string()));
        }

        let end_character = note
            .lines
            .last()
            .map(|line| line.content.encode_utf16().count() as u32)
            .unwrap_or(0);

        // Files outside the workspace are stored with their absolute path
        let file = Path::new(&note.file);
        let path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root().join(file)
        };

        Ok(NoteLocation {
            path,
            start_line: first.min(last) - 1,
            end_line: first.max(last) - 1,
            end_character,
        })
    }

    /// Write every note to the export file and return its path
    pub fn export_markdown(&self) -> Result<PathBuf> {
        let (data, _) = self.store.load()?;
        let path = self.root().join(&self.config.export.file_name);
        export::write_markdown(&*self.fs, &path, &data)?;
        Ok(path)
    }

    /// Notes on `path` that can be shown inline: they need text and line numbers
    pub fn inline_notes(&self, path: &Path) -> Vec<&Note> {
        let file = self.relative_file(path);
        self.tree
            .data()
            .notes_for_file(&file)
            .into_iter()
            .filter(|note| {
                let shown = !note.note.is_empty() && note.first_line().is_some_and(|n| n > 0);
                if !shown {
                    log::warn!("Skipping note {} without text or line numbers", note.id);
                }
                shown
            })
            .collect()
    }

    /// Inline notes covering the 0-based `line` of `path`
    pub fn notes_at(&self, path: &Path, line: u32) -> Vec<&Note> {
        self.inline_notes(path)
            .into_iter()
            .filter(|note| note.covers_line(line.saturating_add(1)))
            .collect()
    }

    fn refresh(&mut self, data: ExtensionData) {
        self.tree.refresh(&data);
    }
}
