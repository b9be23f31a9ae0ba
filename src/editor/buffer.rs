use ropey::Rope;

use super::EditableText;
use crate::markdown::Selection;

/// An editable text field backed by a rope.
///
/// Tracks the selection the way a text input does: two `char` offsets,
/// equal when only a caret is shown.
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            dirty: false,
        }
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The currently selected text.
    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }
}

impl EditableText for EditorBuffer {
    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_value(&mut self, value: &str) {
        if self.rope != value {
            self.rope = Rope::from_str(value);
            self.dirty = true;
        }
        self.selection = self.selection.clamp(self.rope.len_chars());
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamp(self.rope.len_chars());
    }

    /// Edits the rope in place instead of rebuilding it.
    fn replace_selection(&mut self, text: &str) {
        let Selection { start, end } = self.selection;
        if start == end && text.is_empty() {
            return;
        }
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.selection = Selection::caret(start + text.chars().count());
        self.dirty = true;
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}
