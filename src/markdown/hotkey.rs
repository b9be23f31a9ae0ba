use tracing::{debug, error};

use super::{EditResult, Selection, apply_bold_italic_markdown, apply_link_markdown};
use crate::input::{self, KeyBinding, KeyInput};

/// A markdown formatting hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Hotkey {
    Bold,
    Italic,
    Link,
}

/// A markdown hotkey was dispatched for a key it does not handle.
///
/// Callers are expected to match one of the known hotkeys before
/// dispatching, so this indicates a wiring bug rather than user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported key code: {key_code}")]
pub struct UnsupportedKeyError {
    pub key_code: u32,
}

impl Hotkey {
    pub const ALL: [Self; 3] = [Self::Bold, Self::Italic, Self::Link];

    /// The key that triggers this hotkey (together with Cmd/Ctrl).
    pub const fn binding(self) -> KeyBinding {
        match self {
            Self::Bold => input::B,
            Self::Italic => input::I,
            Self::Link => input::K,
        }
    }

    /// Resolve a legacy key code.
    pub fn from_key_code(key_code: u32) -> Result<Self, UnsupportedKeyError> {
        Self::ALL
            .into_iter()
            .find(|hotkey| hotkey.binding().code == key_code)
            .ok_or(UnsupportedKeyError { key_code })
    }

    /// Resolve a key event, by logical key first and key code second.
    ///
    /// Used for layout-aware shortcut matching; dispatch goes by key code.
    pub fn from_key(event: &KeyInput) -> Result<Self, UnsupportedKeyError> {
        Self::ALL
            .into_iter()
            .find(|hotkey| input::is_key_named(event, hotkey.binding()))
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|hotkey| input::is_key_pressed(event, hotkey.binding()))
            })
            .ok_or(UnsupportedKeyError {
                key_code: event.code,
            })
    }
}

/// Apply `hotkey` to `text` with the given selection.
pub fn apply_markdown(hotkey: Hotkey, text: &str, selection: Selection) -> EditResult {
    match hotkey {
        Hotkey::Bold | Hotkey::Italic => apply_bold_italic_markdown(text, selection, hotkey),
        Hotkey::Link => apply_link_markdown(text, selection),
    }
}

/// Apply the markdown hotkey whose key code `event` carries.
///
/// On success the event's default action is suppressed. An event that is
/// not a markdown hotkey is left untouched and reported as an error.
pub fn apply_hotkey_markdown(
    event: &mut KeyInput,
    text: &str,
    selection: Selection,
) -> Result<EditResult, UnsupportedKeyError> {
    let hotkey = Hotkey::from_key_code(event.code).inspect_err(|err| {
        error!(key_code = err.key_code, "markdown hotkey dispatched for an unsupported key");
    })?;
    event.prevent_default();

    let result = apply_markdown(hotkey, text, selection);
    debug!(
        ?hotkey,
        start = result.selection_start,
        end = result.selection_end,
        "applied markdown hotkey"
    );
    Ok(result)
}
