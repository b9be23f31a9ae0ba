use super::{Selection, char_at, char_len};

/// Shrink a selection that grabbed the `_` markers of an italic word.
///
/// Returns the inner selection when the selected text starts and ends with
/// `_` and a space sits on at least one side of it. Returns `None` when
/// nothing needs to change.
pub fn adjust_selection(text: &str, selection: Selection) -> Option<Selection> {
    let selection = selection.clamp(char_len(text));
    if selection.len() < 2 {
        return None;
    }

    let first_underscore = char_at(text, selection.start) == Some('_');
    let last_underscore = char_at(text, selection.end - 1) == Some('_');
    let space_before = selection.start > 0 && char_at(text, selection.start - 1) == Some(' ');
    let space_after = char_at(text, selection.end) == Some(' ');

    (first_underscore && last_underscore && (space_before || space_after))
        .then(|| Selection::new(selection.start + 1, selection.end - 1))
}
