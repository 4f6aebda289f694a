//! Configuration management.
//!
//! Configuration is read from `~/.config/hackstories/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::session::DEFAULT_TERM;
use crate::domain::TriggerPolicy;
use crate::search::DEFAULT_ENDPOINT;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint; `query=<term>` is appended.
    pub endpoint: String,
    /// Term used when none has been stored yet.
    pub default_term: String,
    pub trigger: TriggerPolicy,
    /// Request timeout. Unset means requests may take as long as they take.
    pub timeout_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_term: DEFAULT_TERM.to_string(),
            trigger: TriggerPolicy::default(),
            timeout_secs: None,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run. Missing fields use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/hackstories/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("hackstories").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, DEFAULT_CONFIG).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }
}

const DEFAULT_CONFIG: &str = r##"# hackstories configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").
#
# Keys can be single characters ("d", "/"), special keys (Enter, Tab, BackTab,
# Backspace, Delete, Home, End, PageUp, PageDown, Up, Down, Left, Right, Esc,
# Space, F1-F12) and may carry modifiers ("Ctrl+c", "Shift+Tab", "Alt+Enter").

[search]
endpoint = "https://hn.algolia.com/api/v1/search"
default_term = "React"

# When to search:
#   "submit" - typing edits the term, Enter runs the search
#   "eager"  - every edit runs a search (nothing is sent for an empty term)
#   "filter" - search once at startup, then typing filters titles locally
trigger = "submit"

# Request timeout in seconds. Leave unset to wait indefinitely.
# timeout_secs = 10

[colors]
header = "LightYellow"
active_border = "Cyan"
inactive_border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
submit_enabled = "Green"
submit_disabled = "DarkGray"
author = "Yellow"
link = "Blue"
error = "Red"
loading = "Gray"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Story list
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
dismiss = ["d", "Delete"]
open_in_browser = ["o"]

# Both panes
toggle_focus = ["Tab", "BackTab", "/", "Esc"]
submit = ["Enter"]
"##;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
