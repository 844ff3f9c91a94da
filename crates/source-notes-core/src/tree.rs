use serde::{Deserialize, Serialize};

use crate::model::{ExtensionData, Note};

/// Display node for the notes tree.
///
/// Folders and files are grouping nodes keyed by path segment; notes are leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Folder {
        label: String,
        children: Vec<TreeNode>,
    },
    File {
        label: String,
        children: Vec<TreeNode>,
    },
    Note(NoteNode),
}

/// Leaf payload: what a tree row needs to show one note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteNode {
    pub id: String,
    pub file: String,
    /// The note text
    pub label: String,
    /// "Line N" or "Lines: N to M"
    pub description: String,
    /// Markdown: captured code block followed by the note text
    pub tooltip: String,
}

impl NoteNode {
    pub fn from_note(note: &Note) -> Self {
        let tooltip = format!("```{}\n{}\n```\n{}", note.language, note.code(), note.note);
        Self {
            id: note.id.clone(),
            file: note.file.clone(),
            label: note.note.clone(),
            description: note.line_description(),
            tooltip,
        }
    }
}

impl TreeNode {
    pub fn label(&self) -> &str {
        match self {
            TreeNode::Folder { label, .. } | TreeNode::File { label, .. } => label,
            TreeNode::Note(note) => &note.label,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Folder { children, .. } | TreeNode::File { children, .. } => {
                children.as_slice()
            }
            TreeNode::Note(_) => &[],
        }
    }

    /// Every note leaf under this node, depth first
    pub fn note_ids(&self) -> Vec<&str> {
        match self {
            TreeNode::Note(note) => vec![note.id.as_str()],
            _ => self.children().iter().flat_map(TreeNode::note_ids).collect(),
        }
    }
}

/// Build the root sequence of the notes tree from a flat note list
pub fn build(notes: &[Note]) -> Vec<TreeNode> {
    let entries: Vec<(&Note, Vec<&str>)> = notes
        .iter()
        .map(|note| (note, note.path_segments()))
        .collect();
    let entries: Vec<&(&Note, Vec<&str>)> = entries.iter().collect();
    build_level(&entries, 0)
}

/// Notes paired with their split `file` path
type Entry<'a> = (&'a Note, Vec<&'a str>);

fn build_level(entries: &[&Entry], level: usize) -> Vec<TreeNode> {
    let mut segments: Vec<&str> = Vec::new();
    for (_, path) in entries {
        if let Some(segment) = path.get(level) {
            if !segments.contains(segment) {
                segments.push(*segment);
            }
        }
    }

    let mut nodes = Vec::new();
    for segment in segments {
        let at_segment: Vec<&Entry> = entries
            .iter()
            .filter(|(_, path)| path.get(level) == Some(&segment))
            .copied()
            .collect();

        let inner: Vec<&Entry> = at_segment
            .iter()
            .filter(|(_, path)| path.len() > level + 1)
            .copied()
            .collect();
        let leaves: Vec<TreeNode> = at_segment
            .iter()
            .filter(|(_, path)| path.len() == level + 1)
            .map(|(note, _)| TreeNode::Note(NoteNode::from_note(note)))
            .collect();

        if !inner.is_empty() {
            let children = build_level(&inner, level + 1);
            if !children.is_empty() {
                nodes.push(TreeNode::Folder {
                    label: segment.to_string(),
                    children,
                });
            }
        }

        if !leaves.is_empty() {
            nodes.push(TreeNode::File {
                label: segment.to_string(),
                children: leaves,
            });
        }
    }

    nodes
}

/// Handle returned by [`NoteTree::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn() + Send + Sync>;

/// Cached notes tree with "tree changed" listeners.
///
/// Rebuilt in full on every refresh.
pub struct NoteTree {
    data: ExtensionData,
    roots: Vec<TreeNode>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl NoteTree {
    pub fn new(data: &ExtensionData) -> Self {
        let data = data.clone();
        let roots = build(data.notes());
        Self {
            data,
            roots,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn notes(&self) -> &[Note] {
        self.data.notes()
    }

    /// The document the tree was last built from
    pub fn data(&self) -> &ExtensionData {
        &self.data
    }

    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.data.find(id)
    }

    /// Replace the note list, rebuild, then tell every listener
    pub fn refresh(&mut self, data: &ExtensionData) {
        self.data = data.clone();
        self.roots = build(self.data.notes());
        log::debug!(
            "Rebuilt notes tree: {} notes, {} roots",
            self.data.notes().len(),
            self.roots.len()
        );

        for (_, listener) in &self.listeners {
            listener();
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
