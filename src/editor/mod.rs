//! Editable text fields and the key handling that drives them.
//!
//! The markdown transforms are pure; this module is the thin layer that
//! reads the value and selection out of a field and writes results back.

mod buffer;
mod keys;

pub use buffer::EditorBuffer;
pub use keys::{KeyOutcome, adjust_selection_on_key, handle_key, insert_line_break};

use crate::markdown::{self, EditResult, Selection};

/// A single text field with a selection, such as a message box.
///
/// Offsets are `char` offsets into [`EditableText::value`].
pub trait EditableText {
    fn value(&self) -> String;
    fn selection(&self) -> Selection;
    fn set_value(&mut self, value: &str);
    /// Set the selection, clamping it to the current value.
    fn set_selection_range(&mut self, start: usize, end: usize);

    fn set_caret_position(&mut self, pos: usize) {
        self.set_selection_range(pos, pos);
    }

    fn place_caret_at_end(&mut self) {
        let end = self.value().chars().count();
        self.set_caret_position(end);
    }

    /// Replace the selection with `text` and put the caret after it.
    fn replace_selection(&mut self, text: &str) {
        let value = self.value();
        let (prefix, _, suffix, selection) = markdown::split_at_selection(&value, self.selection());
        self.set_value(&format!("{prefix}{text}{suffix}"));
        self.set_caret_position(selection.start + text.chars().count());
    }

    /// Write a markdown edit back into the field.
    fn apply(&mut self, result: &EditResult) {
        self.set_value(&result.message);
        self.set_selection_range(result.selection_start, result.selection_end);
    }
}
