//! Keybinding configuration for the TUI.
//!
//! Bindings apply while the story list has focus. While the search field has
//! focus, printable keys edit the term and only `submit`, `toggle_focus` and
//! modifier bindings of `quit` are honoured.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub toggle_focus: Vec<String>,
    pub submit: Vec<String>,
    pub dismiss: Vec<String>,
    pub open_in_browser: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["n", "PageDown"]),
            prev_page: keys(&["p", "PageUp"]),
            toggle_focus: keys(&["Tab", "BackTab", "/", "Esc"]),
            submit: keys(&["Enter"]),
            dismiss: keys(&["d", "Delete"]),
            open_in_browser: keys(&["o"]),
        }
    }
}

impl KeybindingConfig {
    /// Action for a key pressed while the story list has focus.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&Vec<String>, Action); 9] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.next_page, Action::NextPage),
            (&self.prev_page, Action::PrevPage),
            (&self.toggle_focus, Action::ToggleFocus),
            (&self.submit, Action::Submit),
            (&self.dismiss, Action::Dismiss),
            (&self.open_in_browser, Action::OpenInBrowser),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_any(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }

    /// Action for a key pressed while the search field has focus. Plain
    /// characters return `None` so they can be typed.
    pub fn get_input_action(&self, key: &KeyEvent) -> Action {
        let is_plain_char = matches!(key.code, KeyCode::Char(_))
            && (key.modifiers - KeyModifiers::SHIFT).is_empty();
        if is_plain_char {
            return Action::None;
        }

        if matches_any(key, &self.submit) {
            Action::Submit
        } else if matches_any(key, &self.toggle_focus) {
            Action::ToggleFocus
        } else if matches_any(key, &self.quit) {
            Action::Quit
        } else {
            Action::None
        }
    }
}

fn matches_any(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored when the binding doesn't ask for it, since terminals
    /// report it inconsistently for uppercase letters and symbols.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers - KeyModifiers::SHIFT))
    }
}

/// Parse "j", "Enter", "F5", "Ctrl+c", "Shift+Tab" and similar.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (modifier_parts, key_part) = match s.rsplit_once('+') {
        // "+" on its own or "Ctrl++" binds the plus key
        Some((mods, "")) => (Some(mods.trim_end_matches('+')), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        if part.is_empty() {
            continue;
        }
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    let code = parse_key_code(key_part)?;
    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(parse_key_string("d").unwrap().code, KeyCode::Char('d'));
        assert_eq!(parse_key_string("/").unwrap().code, KeyCode::Char('/'));
        assert_eq!(parse_key_string("Delete").unwrap().code, KeyCode::Delete);
        assert_eq!(parse_key_string("f5").unwrap().code, KeyCode::F(5));
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("Hyper+x").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(binding.code, KeyCode::Char('a'));
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
        let binding = parse_key_string("Ctrl++").unwrap();
        assert_eq!(binding.code, KeyCode::Char('+'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_binding_requires_modifier() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert!(binding.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_list_actions() {
        let config = KeybindingConfig::default();
        assert_eq!(config.get_action(&key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(config.get_action(&key(KeyCode::Char('j'))), Action::MoveDown);
        assert_eq!(config.get_action(&key(KeyCode::Up)), Action::MoveUp);
        assert_eq!(config.get_action(&key(KeyCode::Char('d'))), Action::Dismiss);
        assert_eq!(config.get_action(&key(KeyCode::Delete)), Action::Dismiss);
        assert_eq!(config.get_action(&key(KeyCode::Char('o'))), Action::OpenInBrowser);
        assert_eq!(config.get_action(&key(KeyCode::Tab)), Action::ToggleFocus);
        assert_eq!(config.get_action(&key(KeyCode::Enter)), Action::Submit);
        assert_eq!(config.get_action(&key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_input_actions_let_characters_through() {
        let config = KeybindingConfig::default();
        assert_eq!(config.get_input_action(&key(KeyCode::Char('q'))), Action::None);
        assert_eq!(config.get_input_action(&key(KeyCode::Char('/'))), Action::None);
        assert_eq!(
            config.get_input_action(&KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Action::None
        );
        assert_eq!(config.get_input_action(&key(KeyCode::Enter)), Action::Submit);
        assert_eq!(config.get_input_action(&key(KeyCode::Tab)), Action::ToggleFocus);
        assert_eq!(config.get_input_action(&key(KeyCode::Esc)), Action::ToggleFocus);
        assert_eq!(
            config.get_input_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }
}
