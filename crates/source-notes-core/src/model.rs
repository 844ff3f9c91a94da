use serde::{Deserialize, Serialize};

/// A single captured source line (1-based `num`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub num: u32,
    #[serde(default)]
    pub content: String,
}

impl Line {
    pub fn new(num: u32, content: impl Into<String>) -> Self {
        Self {
            num,
            content: content.into(),
        }
    }
}

/// A user annotation bound to a snapshot of source lines.
///
/// Every field defaults on read so hand-edited records still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: String,
    /// Workspace-relative path, `/` separated
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub language: String,
    /// ISO-8601, e.g. `2024-01-01T00:00:00.000Z`
    #[serde(default)]
    pub created: String,
}

impl Note {
    pub fn first_line(&self) -> Option<u32> {
        self.lines.first().map(|line| line.num)
    }

    pub fn last_line(&self) -> Option<u32> {
        self.lines.last().map(|line| line.num)
    }

    /// "Line 4" for a single line, "Lines: 4 to 9" for a range
    pub fn line_description(&self) -> String {
        match (self.first_line(), self.last_line()) {
            (Some(start), Some(end)) if start == end => format!("Line {}", start),
            (Some(start), Some(end)) => format!("Lines: {} to {}", start, end),
            _ => String::new(),
        }
    }

    /// Captured line contents joined with newlines
    pub fn code(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the 1-based line `num` falls inside the captured range
    pub fn covers_line(&self, num: u32) -> bool {
        match (self.first_line(), self.last_line()) {
            (Some(start), Some(end)) => start.min(end) <= num && num <= start.max(end),
            _ => false,
        }
    }

    pub fn path_segments(&self) -> Vec<&str> {
        self.file.split('/').collect()
    }
}

/// The persisted note document.
///
/// `notes` stays absent when it was absent on disk and nothing was added.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtensionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
}

impl ExtensionData {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self { notes: Some(notes) }
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_deref().unwrap_or_default()
    }

    pub fn notes_mut(&mut self) -> &mut Vec<Note> {
        self.notes.get_or_insert_with(Vec::new)
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes().iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Notes attached to a file, in document order
    pub fn notes_for_file(&self, file: &str) -> Vec<&Note> {
        self.notes().iter().filter(|note| note.file == file).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_with_lines(nums: &[u32]) -> Note {
        Note {
            lines: nums.iter().map(|n| Line::new(*n, format!("line {}", n))).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_line_description() {
        assert_eq!(note_with_lines(&[3]).line_description(), "Line 3");
        assert_eq!(note_with_lines(&[3, 4, 5]).line_description(), "Lines: 3 to 5");
        assert_eq!(note_with_lines(&[]).line_description(), "");
    }

    #[test]
    fn test_covers_line() {
        let note = note_with_lines(&[10, 11, 12]);
        assert!(note.covers_line(10));
        assert!(note.covers_line(12));
        assert!(!note.covers_line(9));
        assert!(!note.covers_line(13));
        assert!(!note_with_lines(&[]).covers_line(1));
    }

    #[test]
    fn test_partial_note_is_tolerated() {
        let data: ExtensionData =
            serde_json::from_str(r#"{"notes":[{"id":"a","note":"only text","extra":1}]}"#)
                .unwrap();
        let note = &data.notes()[0];
        assert_eq!(note.id, "a");
        assert_eq!(note.file, "");
        assert!(note.lines.is_empty());
    }

    #[test]
    fn test_notes_for_file() {
        let data = ExtensionData::with_notes(vec![
            Note { id: "1".into(), file: "a/b.ts".into(), ..Default::default() },
            Note { id: "2".into(), file: "c.ts".into(), ..Default::default() },
            Note { id: "3".into(), file: "a/b.ts".into(), ..Default::default() },
        ]);

        let ids: Vec<_> = data.notes_for_file("a/b.ts").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(data.notes_for_file("a").is_empty());
        assert_eq!(data.notes()[0].path_segments(), vec!["a", "b.ts"]);
    }

    #[test]
    fn test_absent_notes_is_not_written() {
        let data: ExtensionData = serde_json::from_str("{}").unwrap();
        assert!(data.notes.is_none());
        assert!(data.notes().is_empty());
        assert_eq!(serde_json::to_string(&data).unwrap(), "{}");
    }
}
