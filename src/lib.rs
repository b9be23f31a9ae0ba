// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Hotmark
//!
//! Markdown editing hotkeys for plain text fields.
//!
//! Given the text of a message box, its selection and a pressed shortcut,
//! hotmark works out the new text and selection:
//! - Cmd/Ctrl+B toggles `**bold**`
//! - Cmd/Ctrl+I toggles `*italic*`
//! - Cmd/Ctrl+K wraps the selection or the word at the caret in
//!   `[text](url)` and selects the `url` placeholder
//!
//! ## Architecture
//!
//! - **Transforms** are pure functions from text and selection to an
//!   [`markdown::EditResult`]
//! - **Input** turns host key events into hotkeys
//! - **Editor** reads fields and writes results back
//!
//! ## Modules
//!
//! - [`markdown`]: Bold, italic and link toggles, selection adjustment
//! - [`input`]: Key matching and shortcut detection
//! - [`editor`]: Editable text fields and key handling
//! - [`config`]: Saved command-line defaults

pub mod config;
pub mod editor;
pub mod input;
pub mod markdown;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::{EditableText, EditorBuffer, KeyOutcome, handle_key};
    pub use crate::input::{KeyInput, Platform};
    pub use crate::markdown::{EditResult, Hotkey, Selection, UnsupportedKeyError};
}
