//! Markdown hotkey transformations.
//!
//! Every function here is pure: it takes the current text and selection and
//! returns the text and selection the editor should show next. Offsets count
//! `char`s, not bytes.

mod emphasis;
mod hotkey;
mod link;
mod selection;

use serde::Serialize;

pub use emphasis::{BOLD_MD, ITALIC_MD, apply_bold_italic_markdown};
pub use hotkey::{Hotkey, UnsupportedKeyError, apply_hotkey_markdown, apply_markdown};
pub use link::{LINK_END_MD, LINK_START_MD, apply_link_markdown, find_word_end, find_word_start};
pub use selection::adjust_selection;

/// A selection in a text buffer, as `char` offsets.
///
/// `start == end` is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, ordering the bounds so that `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A caret at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Whether nothing is selected.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both bounds into a buffer of `len` chars.
    pub fn clamp(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

/// The outcome of a markdown hotkey: the new text and where the selection
/// goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    pub message: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl EditResult {
    pub(crate) const fn new(message: String, selection_start: usize, selection_end: usize) -> Self {
        Self {
            message,
            selection_start,
            selection_end,
        }
    }

    /// The resulting selection.
    pub const fn selection(&self) -> Selection {
        Selection {
            start: self.selection_start,
            end: self.selection_end,
        }
    }
}

/// Number of chars in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `char_idx`-th char, or `text.len()` past the end.
pub(crate) fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices().nth(char_idx).map_or(text.len(), |(b, _)| b)
}

/// The char at `char_idx`, if any.
pub(crate) fn char_at(text: &str, char_idx: usize) -> Option<char> {
    text.chars().nth(char_idx)
}

/// Split `text` into `(prefix, selected, suffix)`.
///
/// The selection is clamped to the text first, so the returned selection is
/// always valid for it.
pub(crate) fn split_at_selection(text: &str, selection: Selection) -> (&str, &str, &str, Selection) {
    let selection = selection.clamp(char_len(text));
    let start = byte_index(text, selection.start);
    let end = byte_index(text, selection.end);
    (&text[..start], &text[start..end], &text[end..], selection)
}
