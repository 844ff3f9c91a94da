use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StoreConfig;
use crate::error::{NotesError, Result};
use crate::model::{ExtensionData, Note};
use crate::vfs::FileSystem;

/// Durable, workspace-scoped CRUD over the note document.
///
/// Every mutation is one full read followed by one full write. Mutations on
/// the same store are serialised; separate processes still race (last write wins).
pub struct NoteStore {
    root: PathBuf,
    config: StoreConfig,
    fs: Arc<dyn FileSystem>,
    write_lock: Mutex<()>,
}

impl NoteStore {
    pub fn new(root: PathBuf, config: StoreConfig, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root,
            config,
            fs,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// `<root>/<directory>/<file_name>`, e.g. `<root>/.vscode/source-notes.json`
    pub fn document_path(&self) -> PathBuf {
        self.root
            .join(&self.config.directory)
            .join(&self.config.file_name)
    }

    /// Read the note document.
    ///
    /// A missing or blank file reads as an empty document; the returned path is
    /// where it will be written.
    pub fn load(&self) -> Result<(ExtensionData, PathBuf)> {
        let directory = self.root.join(&self.config.directory);
        self.fs
            .create_dir_all(&directory)
            .map_err(|source| NotesError::CreateDir {
                path: directory.clone(),
                source,
            })?;

        let path = self.document_path();
        if !self.fs.exists(&path) {
            log::debug!("No note document at {:?}", path);
            return Ok((ExtensionData::default(), path));
        }

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|source| NotesError::Read {
                path: path.clone(),
                source,
            })?;

        if content.trim().is_empty() {
            return Ok((ExtensionData::default(), path));
        }

        let data: ExtensionData =
            serde_json::from_str(&content).map_err(|source| NotesError::Parse {
                path: path.clone(),
                source,
            })?;
        log::debug!("Loaded {} notes from {:?}", data.notes().len(), path);

        Ok((data, path))
    }

    /// Overwrite the document at `path` with pretty-printed JSON.
    pub fn save(&self, data: &ExtensionData, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(data).map_err(NotesError::Encode)?;
        self.fs
            .write(path, &content)
            .map_err(|source| NotesError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Saved {} notes to {:?}", data.notes().len(), path);
        Ok(())
    }

    /// Look up a single note by id
    pub fn find(&self, id: &str) -> Result<Option<Note>> {
        let (data, _) = self.load()?;
        Ok(data.find(id).cloned())
    }

    /// Append `note` to the end of the document. No dedup, no sorting.
    pub fn append(&self, note: Note) -> Result<ExtensionData> {
        self.mutate(|data| {
            data.notes_mut().push(note);
            Ok(())
        })
    }

    /// Replace the text of the note with `id`. Other fields are untouched.
    pub fn update(&self, id: &str, text: &str) -> Result<ExtensionData> {
        self.mutate(|data| {
            self.check_known(data, id)?;
            for note in data.notes_mut().iter_mut().filter(|note| note.id == id) {
                note.note = text.to_string();
            }
            Ok(())
        })
    }

    /// Drop the note with `id`.
    pub fn remove(&self, id: &str) -> Result<ExtensionData> {
        self.mutate(|data| {
            self.check_known(data, id)?;
            data.notes_mut().retain(|note| note.id != id);
            Ok(())
        })
    }

    fn mutate<F>(&self, apply: F) -> Result<ExtensionData>
    where
        F: FnOnce(&mut ExtensionData) -> Result<()>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let (mut data, path) = self.load()?;
        apply(&mut data)?;
        self.save(&data, &path)?;
        Ok(data)
    }

    fn check_known(&self, data: &ExtensionData, id: &str) -> Result<()> {
        if data.contains(id) {
            return Ok(());
        }
        if self.config.strict_ids {
            return Err(NotesError::NotFound(id.to_string()));
        }
        log::warn!("No note with id {}; saving document unchanged", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;
    use crate::vfs::PhysicalFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (NoteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = NoteStore::new(
            temp_dir.path().to_path_buf(),
            StoreConfig::default(),
            Arc::new(PhysicalFileSystem),
        );
        (store, temp_dir)
    }

    fn sample_note(id: &str, file: &str) -> Note {
        Note {
            id: id.to_string(),
            file: file.to_string(),
            lines: vec![Line::new(1, "fn main() {"), Line::new(2, "}")],
            note: format!("note {}", id),
            language: "rust".to_string(),
            created: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_load_missing_document() {
        let (store, temp_dir) = create_test_store();

        let (data, path) = store.load().unwrap();

        assert_eq!(data, ExtensionData::default());
        assert_eq!(path, temp_dir.path().join(".vscode").join("source-notes.json"));
        assert!(temp_dir.path().join(".vscode").is_dir());
        assert!(!path.exists(), "load must not create the document");
    }

    #[test]
    fn test_load_blank_document() {
        let (store, _temp_dir) = create_test_store();
        let path = store.document_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "  \n\t").unwrap();

        let (data, _) = store.load().unwrap();
        assert_eq!(data, ExtensionData::default());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let (store, _temp_dir) = create_test_store();
        let path = store.document_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ \"notes\": [").unwrap();

        assert!(matches!(store.load(), Err(NotesError::Parse { .. })));
        assert!(matches!(store.append(sample_note("a", "a.rs")), Err(NotesError::Parse { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"notes\": [");
    }

    #[test]
    fn test_save_load_round_trip() {
        let (store, _temp_dir) = create_test_store();
        let (_, path) = store.load().unwrap();
        let data = ExtensionData::with_notes(vec![sample_note("a", "src/a.rs"), sample_note("b", "b.rs")]);

        store.save(&data, &path).unwrap();
        let (loaded, _) = store.load().unwrap();
        assert_eq!(loaded, data);

        store.save(&loaded, &path).unwrap();
        let (reloaded, _) = store.load().unwrap();
        assert_eq!(reloaded, data);
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let (store, _temp_dir) = create_test_store();
        store.append(sample_note("a", "a.rs")).unwrap();

        let content = fs::read_to_string(store.document_path()).unwrap();
        assert!(content.starts_with("{\n  \"notes\": [\n"));
    }

    #[test]
    fn test_empty_object_round_trips() {
        let (store, _temp_dir) = create_test_store();
        let path = store.document_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{}").unwrap();

        let (data, path) = store.load().unwrap();
        store.save(&data, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_append_keeps_order() {
        let (store, _temp_dir) = create_test_store();

        store.append(sample_note("a", "a.rs")).unwrap();
        store.append(sample_note("b", "b.rs")).unwrap();
        let data = store.append(sample_note("a", "c.rs")).unwrap();

        let ids: Vec<_> = data.notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
        assert_eq!(data.notes()[2], sample_note("a", "c.rs"));

        let (on_disk, _) = store.load().unwrap();
        assert_eq!(on_disk, data);
    }

    #[test]
    fn test_update_changes_only_note_text() {
        let (store, _temp_dir) = create_test_store();
        store.append(sample_note("a", "a.rs")).unwrap();
        store.append(sample_note("b", "b.rs")).unwrap();

        let data = store.update("a", "rewritten").unwrap();

        let mut expected = sample_note("a", "a.rs");
        expected.note = "rewritten".to_string();
        assert_eq!(data.notes(), &[expected, sample_note("b", "b.rs")]);
        assert_eq!(store.load().unwrap().0, data);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (store, _temp_dir) = create_test_store();
        let before = store.append(sample_note("a", "a.rs")).unwrap();

        let after = store.update("missing", "text").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_and_idempotence() {
        let (store, _temp_dir) = create_test_store();
        store.append(sample_note("a", "a.rs")).unwrap();
        store.append(sample_note("b", "b.rs")).unwrap();
        store.append(sample_note("c", "c.rs")).unwrap();

        let once = store.remove("b").unwrap();
        let twice = store.remove("b").unwrap();

        assert_eq!(once.notes(), &[sample_note("a", "a.rs"), sample_note("c", "c.rs")]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_on_missing_document_creates_empty_list() {
        let (store, _temp_dir) = create_test_store();

        let data = store.remove("nothing").unwrap();

        assert!(data.notes().is_empty());
        assert!(store.document_path().exists());
    }

    #[test]
    fn test_strict_ids_rejects_unknown_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            strict_ids: true,
            ..Default::default()
        };
        let store = NoteStore::new(temp_dir.path().to_path_buf(), config, Arc::new(PhysicalFileSystem));
        store.append(sample_note("a", "a.rs")).unwrap();
        let before = fs::read_to_string(store.document_path()).unwrap();

        assert!(matches!(store.update("zzz", "x"), Err(NotesError::NotFound(id)) if id == "zzz"));
        assert!(matches!(store.remove("zzz"), Err(NotesError::NotFound(_))));
        assert_eq!(fs::read_to_string(store.document_path()).unwrap(), before);

        assert!(store.remove("a").unwrap().notes().is_empty());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let (store, _temp_dir) = create_test_store();
        // A directory where the document should be makes the write fail
        fs::create_dir_all(store.document_path()).unwrap();

        let result = store.append(sample_note("a", "a.rs"));
        assert!(matches!(result, Err(NotesError::Write { .. })));
    }

    #[test]
    fn test_find() {
        let (store, _temp_dir) = create_test_store();
        store.append(sample_note("a", "a.rs")).unwrap();

        assert_eq!(store.find("a").unwrap(), Some(sample_note("a", "a.rs")));
        assert_eq!(store.find("b").unwrap(), None);
    }

    #[test]
    fn test_custom_location() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            directory: PathBuf::from("notes"),
            file_name: "mine.json".to_string(),
            strict_ids: false,
        };
        let store = NoteStore::new(temp_dir.path().to_path_buf(), config, Arc::new(PhysicalFileSystem));
        store.append(sample_note("a", "a.rs")).unwrap();

        assert!(temp_dir.path().join("notes").join("mine.json").is_file());
    }
}
