//! hotmark - apply markdown editing hotkeys to text.
//!
//! # Usage
//!
//! ```bash
//! echo "hello world" | hotmark --selection 0:5 --hotkey bold
//! hotmark draft.md --selection 12 --hotkey link --json
//! hotmark draft.md --selection 4:8 --adjust
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::KeyModifiers;

use hotmark::config::{
    ConfigFlags, PlatformMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use hotmark::editor::{self, EditableText, EditorBuffer};
use hotmark::input::{KeyInput, Platform};
use hotmark::markdown::{self, EditResult, Hotkey, Selection};

/// Apply markdown editing hotkeys to text
#[derive(Parser, Debug)]
#[command(name = "hotmark", version, about, long_about = None)]
struct Cli {
    /// Text file to edit (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Selection as START:END char offsets, or a single caret offset
    #[arg(short, long, value_name = "START:END", value_parser = parse_selection, default_value = "0")]
    selection: Selection,

    /// Markdown hotkey to press
    #[arg(long, value_enum, group = "action")]
    hotkey: Option<Hotkey>,

    /// Dispatch a raw key code as a markdown hotkey (66 = B, 73 = I, 75 = K)
    #[arg(long, value_name = "CODE", group = "action")]
    key_code: Option<u32>,

    /// Drop italic `_` markers from the edges of the selection
    #[arg(long, group = "action")]
    adjust: bool,

    /// Replace the selection with a line break (alt+Enter)
    #[arg(long, group = "action")]
    line_break: bool,

    /// Write the edited text back to FILE
    #[arg(short, long, requires = "file")]
    in_place: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log each edit to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Shortcut modifier convention (mac uses Cmd, other uses Ctrl)
    #[arg(long, value_enum)]
    platform: Option<PlatformMode>,

    /// The host inserts alt+Enter line breaks itself
    #[arg(long)]
    native_alt_enter: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn parse_selection(s: &str) -> Result<Selection, String> {
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid offset {part:?}: {err}"))
    };
    match s.split_once(':') {
        Some((start, end)) => Ok(Selection::new(parse(start)?, parse(end)?)),
        None => Ok(Selection::caret(parse(s)?)),
    }
}

fn shortcut_modifier(platform: Platform) -> KeyModifiers {
    if platform.mac {
        KeyModifiers::SUPER
    } else {
        KeyModifiers::CONTROL
    }
}

fn read_input(cli: &Cli) -> Result<String> {
    match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => io::read_to_string(io::stdin()).context("Failed to read stdin"),
    }
}

fn run_action(cli: &Cli, buffer: &mut EditorBuffer, platform: Platform) -> Result<()> {
    if let Some(hotkey) = cli.hotkey {
        let binding = hotkey.binding();
        let mut event = KeyInput::new(binding.name, binding.code, shortcut_modifier(platform));
        editor::handle_key(buffer, &mut event, platform);
    } else if let Some(code) = cli.key_code {
        let mut event = KeyInput::from_code(code, shortcut_modifier(platform));
        let result = markdown::apply_hotkey_markdown(&mut event, &buffer.value(), buffer.selection())?;
        buffer.apply(&result);
    } else if cli.adjust {
        let mut event = KeyInput::from_code(0, KeyModifiers::NONE);
        if editor::adjust_selection_on_key(buffer, &mut event).is_none() {
            tracing::info!("selection has no italic markers to drop");
        }
    } else if cli.line_break {
        editor::insert_line_break(buffer);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        json: cli.json,
        verbose: cli.verbose,
        native_alt_enter: cli.native_alt_enter,
        platform: cli.platform,
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Initialize logging
    let level = if effective.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let has_action = cli.hotkey.is_some() || cli.key_code.is_some() || cli.adjust || cli.line_break;
    if !has_action {
        if cli.save || cli.clear {
            return Ok(());
        }
        anyhow::bail!("Nothing to do: pass --hotkey, --key-code, --adjust or --line-break");
    }

    let text = read_input(&cli)?;
    let mut buffer = EditorBuffer::from_text(&text);
    buffer.set_selection_range(cli.selection.start, cli.selection.end);
    if buffer.selection() != cli.selection {
        tracing::warn!(
            requested = ?cli.selection,
            clamped = ?buffer.selection(),
            "selection clamped to text length"
        );
    }

    run_action(&cli, &mut buffer, effective.platform()).context("Edit failed")?;

    let selection = buffer.selection();
    let result = EditResult {
        message: buffer.value(),
        selection_start: selection.start,
        selection_end: selection.end,
    };

    if cli.in_place {
        if let Some(path) = &cli.file {
            if buffer.is_dirty() {
                fs::write(path, &result.message)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
    }

    if effective.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        if !cli.in_place {
            print!("{}", result.message);
            if !result.message.ends_with('\n') {
                println!();
            }
        }
        eprintln!("selection {}:{}", result.selection_start, result.selection_end);
    }
    Ok(())
}
