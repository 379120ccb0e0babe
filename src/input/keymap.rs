use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Focus;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, focus: Focus) -> Option<Command> {
    map_key_to_command_with_preset(key, focus, KeymapPreset::Default)
}

/// `None` in search focus means the key belongs to the text field.
pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    focus: Focus,
    preset: KeymapPreset,
) -> Option<Command> {
    match focus {
        Focus::Search => match preset {
            KeymapPreset::Default => map_search_key_default(key),
            KeymapPreset::Emacs => map_search_key_emacs(key),
        },
        Focus::Links => match preset {
            KeymapPreset::Default => map_links_key_default(key),
            KeymapPreset::Emacs => map_links_key_emacs(key),
        },
    }
}

fn map_search_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('u') => Some(Command::ClearQuery),
            KeyCode::Char('l') => Some(Command::FocusLinks),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Command::HighlightPrev),
        KeyCode::Down => Some(Command::HighlightNext),
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Esc => Some(Command::Dismiss),
        KeyCode::Tab => Some(Command::ToggleEngineDropdown),
        _ => None,
    }
}

fn map_search_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::HighlightNext),
            KeyCode::Char('p') => Some(Command::HighlightPrev),
            KeyCode::Char('g') => Some(Command::Dismiss),
            _ => map_search_key_default(key),
        };
    }
    map_search_key_default(key)
}

fn map_links_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Command::NextLink),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::PrevLink),
        KeyCode::Enter => Some(Command::OpenLink),
        KeyCode::Char('m') => Some(Command::ToggleLinks),
        KeyCode::Char('w') => Some(Command::NextWallpaper),
        KeyCode::Char('o') => Some(Command::OpenWallpaper),
        KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Esc => Some(Command::FocusSearch),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

fn map_links_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::NextLink),
            KeyCode::Char('p') => Some(Command::PrevLink),
            KeyCode::Char('g') => Some(Command::FocusSearch),
            _ => map_links_key_default(key),
        };
    }
    map_links_key_default(key)
}
