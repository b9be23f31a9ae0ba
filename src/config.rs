use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::input::Platform;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMode {
    Auto,
    Mac,
    Other,
}

impl PlatformMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Mac => "mac",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub json: bool,
    pub verbose: bool,
    pub native_alt_enter: bool,
    pub platform: Option<PlatformMode>,
}

/// An on/off flag as spelled in config files and on the command line.
struct Switch {
    /// Spellings; the first is the one written by `--save`.
    names: &'static [&'static str],
    get: fn(&ConfigFlags) -> bool,
    set: fn(&mut ConfigFlags),
}

const SWITCHES: [Switch; 3] = [
    Switch {
        names: &["--json"],
        get: |flags| flags.json,
        set: |flags| flags.json = true,
    },
    Switch {
        names: &["--verbose", "-v"],
        get: |flags| flags.verbose,
        set: |flags| flags.verbose = true,
    },
    Switch {
        names: &["--native-alt-enter"],
        get: |flags| flags.native_alt_enter,
        set: |flags| flags.native_alt_enter = true,
    },
];

impl ConfigFlags {
    /// Switches set in either side are kept; `other`'s platform wins.
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = Self {
            platform: other.platform.or(self.platform),
            ..self.clone()
        };
        for switch in SWITCHES.iter().filter(|switch| (switch.get)(other)) {
            (switch.set)(&mut merged);
        }
        merged
    }

    /// The key-handling platform these flags describe.
    pub const fn platform(&self) -> Platform {
        let mac = match self.platform {
            Some(PlatformMode::Mac) => true,
            Some(PlatformMode::Other) => false,
            Some(PlatformMode::Auto) | None => Platform::current().mac,
        };
        Platform {
            mac,
            native_alt_enter: self.native_alt_enter,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("hotmark").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("hotmark")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("hotmark").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("hotmark").join("config");
        }
    }

    PathBuf::from(".hotmarkrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".hotmarkrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# hotmark defaults (saved with --save)".to_string()];
    lines.extend(
        SWITCHES
            .iter()
            .filter(|switch| (switch.get)(flags))
            .map(|switch| switch.names[0].to_string()),
    );
    if let Some(platform) = flags.platform {
        lines.push(format!("--platform {}", platform.as_str()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the persisted flags out of a token list (a config file or argv).
/// Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if let Some(switch) = SWITCHES.iter().find(|switch| switch.names.contains(&token)) {
            (switch.set)(&mut flags);
        } else if token == "--platform" {
            if let Some(next) = tokens.get(i + 1) {
                flags.platform = parse_platform(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--platform=") {
            flags.platform = parse_platform(value);
        }
        i += 1;
    }
    flags
}

fn parse_platform(s: &str) -> Option<PlatformMode> {
    match s {
        "auto" => Some(PlatformMode::Auto),
        "mac" => Some(PlatformMode::Mac),
        "other" => Some(PlatformMode::Other),
        _ => None,
    }
}
