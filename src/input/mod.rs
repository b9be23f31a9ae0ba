//! Keyboard events as the editor sees them.
//!
//! Key matching works on the logical key first (so remapped latin layouts
//! such as Dvorak match by letter) and falls back to the legacy key code (so
//! non-latin layouts match by physical position).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::markdown::Hotkey;

/// Key code reported while an IME composition is in progress.
pub const COMPOSING_KEY_CODE: u32 = 229;

pub const B: KeyBinding = KeyBinding::new(KeyName::Char('b'), 66);
pub const I: KeyBinding = KeyBinding::new(KeyName::Char('i'), 73);
pub const K: KeyBinding = KeyBinding::new(KeyName::Char('k'), 75);
pub const ENTER: KeyBinding = KeyBinding::new(KeyName::Enter, 13);

/// The logical key of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyName {
    Char(char),
    Enter,
    /// A dead key starting a composed character.
    Dead,
    /// The host could not name the key.
    Unidentified,
}

/// A key to match against: its logical name and legacy key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub name: KeyName,
    pub code: u32,
}

impl KeyBinding {
    pub const fn new(name: KeyName, code: u32) -> Self {
        Self { name, code }
    }
}

/// Host platform traits that change how key combos are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Platform {
    /// Cmd replaces Ctrl for shortcuts.
    pub mac: bool,
    /// The host already turns alt+Enter into a line break.
    pub native_alt_enter: bool,
}

impl Platform {
    /// The platform this binary was built for.
    pub const fn current() -> Self {
        Self {
            mac: cfg!(target_os = "macos"),
            native_alt_enter: false,
        }
    }
}

/// A key press delivered to an editable text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: KeyName,
    /// Legacy numeric key code (`B` is 66).
    pub code: u32,
    pub modifiers: KeyModifiers,
    default_prevented: bool,
}

impl KeyInput {
    pub const fn new(key: KeyName, code: u32, modifiers: KeyModifiers) -> Self {
        Self {
            key,
            code,
            modifiers,
            default_prevented: false,
        }
    }

    /// An event known only by its key code.
    pub const fn from_code(code: u32, modifiers: KeyModifiers) -> Self {
        Self::new(KeyName::Unidentified, code, modifiers)
    }

    /// Stop the host from running the key's default action.
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    pub const fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    pub const fn shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Cmd on macOS. Terminals report it as either super or meta.
    pub const fn meta(&self) -> bool {
        self.modifiers.intersects(KeyModifiers::SUPER.union(KeyModifiers::META))
    }
}

impl From<KeyEvent> for KeyInput {
    fn from(event: KeyEvent) -> Self {
        let (key, code) = match event.code {
            KeyCode::Char(c) => (KeyName::Char(c), legacy_key_code(c)),
            KeyCode::Enter => (KeyName::Enter, ENTER.code),
            _ => (KeyName::Unidentified, 0),
        };
        Self::new(key, code, event.modifiers)
    }
}

fn legacy_key_code(c: char) -> u32 {
    match c {
        'a'..='z' => u32::from(c.to_ascii_uppercase()),
        'A'..='Z' | '0'..='9' | ' ' => u32::from(c),
        _ => 0,
    }
}

/// Whether `event` is a press of `binding`.
pub fn is_key_pressed(event: &KeyInput, binding: KeyBinding) -> bool {
    is_key_named(event, binding) || (event.code != COMPOSING_KEY_CODE && event.code == binding.code)
}

/// Whether the logical key of `event` is `binding`, ignoring key codes.
pub fn is_key_named(event: &KeyInput, binding: KeyBinding) -> bool {
    if event.code == COMPOSING_KEY_CODE {
        return false;
    }

    match (event.key, binding.name) {
        (KeyName::Char(pressed), KeyName::Char(expected)) => {
            pressed == expected || expected.to_uppercase().eq(std::iter::once(pressed))
        }
        (KeyName::Enter, KeyName::Enter) => true,
        _ => false,
    }
}

/// Whether the shortcut modifier (Cmd on macOS, Ctrl elsewhere) is held.
///
/// Unless `allow_alt` is set, Ctrl+Alt does not count, since that is AltGr
/// on many non-mac layouts.
pub const fn cmd_or_ctrl_pressed(event: &KeyInput, platform: Platform, allow_alt: bool) -> bool {
    if platform.mac {
        event.meta()
    } else {
        event.ctrl() && (allow_alt || !event.alt())
    }
}

/// The markdown hotkey `event` triggers, if any: Cmd/Ctrl with B, I or K and
/// no Alt or Shift.
pub fn hotkey_for(event: &KeyInput, platform: Platform) -> Option<Hotkey> {
    if !cmd_or_ctrl_pressed(event, platform, false) || event.alt() || event.shift() {
        return None;
    }
    Hotkey::from_key(event).ok()
}

/// Whether `event` is alt+Enter that the host leaves unhandled.
///
/// Shift+Enter is handled everywhere already, and hosts with native alt+Enter
/// support insert the line break themselves.
pub fn is_unhandled_line_break_combo(event: &KeyInput, platform: Platform) -> bool {
    is_key_pressed(event, ENTER)
        && !event.shift()
        && event.alt()
        && !platform.native_alt_enter
        && !cmd_or_ctrl_pressed(event, platform, false)
}
