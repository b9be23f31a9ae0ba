use tracing::debug;

use super::EditableText;
use crate::input::{self, KeyInput, Platform};
use crate::markdown::{self, EditResult, Selection};

/// What a key press did to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not an editor shortcut; the host should run the key's default action.
    Ignored,
    /// A markdown hotkey rewrote the field. Carries the result so callers
    /// can persist the draft.
    Markdown(EditResult),
    /// Alt+Enter inserted a line break. Carries the new value.
    LineBreak(String),
}

/// Run the editor shortcuts for `event` against `target`.
///
/// Markdown hotkeys and the alt+Enter line break are applied and their
/// default action suppressed. Other keys are left alone.
///
/// Hotkeys are matched by logical key before key code, so remapped layouts
/// trigger the letter printed on the key.
pub fn handle_key<T: EditableText>(
    target: &mut T,
    event: &mut KeyInput,
    platform: Platform,
) -> KeyOutcome {
    if let Some(hotkey) = input::hotkey_for(event, platform) {
        event.prevent_default();
        let result = markdown::apply_markdown(hotkey, &target.value(), target.selection());
        target.apply(&result);
        debug!(?hotkey, key_code = event.code, "handled markdown shortcut");
        return KeyOutcome::Markdown(result);
    }

    if input::is_unhandled_line_break_combo(event, platform) {
        event.prevent_default();
        return KeyOutcome::LineBreak(insert_line_break(target));
    }

    KeyOutcome::Ignored
}

/// Replace the selection (or insert at the caret) with a newline.
///
/// Returns the new value.
pub fn insert_line_break<T: EditableText>(target: &mut T) -> String {
    let at = target.selection().start;
    target.replace_selection("\n");
    debug!(at, "inserted line break");
    target.value()
}

/// Drop italic `_` markers from the edges of the field's selection.
///
/// Returns the adjusted selection; the event's default is suppressed only
/// when the selection changed.
pub fn adjust_selection_on_key<T: EditableText>(
    target: &mut T,
    event: &mut KeyInput,
) -> Option<Selection> {
    let adjusted = markdown::adjust_selection(&target.value(), target.selection())?;
    event.prevent_default();
    target.set_selection_range(adjusted.start, adjusted.end);
    Some(adjusted)
}
