//! Keyboard mapping for the terminal driver
//!
//! Turns key presses into engine actions, filtered by phase: gameplay keys only while
//! playing, resume only while paused, start only from the menu or after game over.

use crate::game::{Action, Phase};
use crate::settings::KeyBindings as KeyNames;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(Action),
    /// Leave the program
    Exit,
}

/// Parsed key bindings - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    move_left: Vec<KeyCode>,
    move_right: Vec<KeyCode>,
    soft_drop: Vec<KeyCode>,
    hard_drop: Vec<KeyCode>,
    rotate: Vec<KeyCode>,
    start: Vec<KeyCode>,
    pause: Vec<KeyCode>,
    quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key name into a KeyCode
    fn parse_key(name: &str) -> Option<KeyCode> {
        let code = match name.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    fn parse_keys(names: &[String]) -> Vec<KeyCode> {
        names
            .iter()
            .filter_map(|name| {
                let code = Self::parse_key(name);
                if code.is_none() {
                    tracing::warn!(key = %name, "ignoring unknown key name");
                }
                code
            })
            .collect()
    }

    pub fn from_names(names: &KeyNames) -> Self {
        Self {
            move_left: Self::parse_keys(&names.move_left),
            move_right: Self::parse_keys(&names.move_right),
            soft_drop: Self::parse_keys(&names.soft_drop),
            hard_drop: Self::parse_keys(&names.hard_drop),
            rotate: Self::parse_keys(&names.rotate),
            start: Self::parse_keys(&names.start),
            pause: Self::parse_keys(&names.pause),
            quit: Self::parse_keys(&names.quit),
        }
    }

    /// Map a key press to a command, or None if it means nothing in this phase
    pub fn command(&self, key: KeyEvent, phase: Phase) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Exit);
        }

        let code = normalize_key(key.code);

        if self.quit.contains(&code) {
            // quitting a live game ends it first so the score is recorded
            return Some(match phase {
                Phase::Playing | Phase::Paused => Command::Game(Action::GameOver),
                Phase::Menu | Phase::GameOver => Command::Exit,
            });
        }

        let action = match phase {
            Phase::Menu | Phase::GameOver => {
                if self.start.contains(&code) {
                    Action::Start
                } else {
                    return None;
                }
            }
            Phase::Paused => {
                if self.pause.contains(&code) {
                    Action::Resume
                } else {
                    return None;
                }
            }
            Phase::Playing => {
                if self.move_left.contains(&code) {
                    Action::MoveLeft
                } else if self.move_right.contains(&code) {
                    Action::MoveRight
                } else if self.soft_drop.contains(&code) {
                    Action::SoftDrop
                } else if self.hard_drop.contains(&code) {
                    Action::HardDrop
                } else if self.rotate.contains(&code) {
                    Action::Rotate
                } else if self.pause.contains(&code) {
                    Action::Pause
                } else {
                    return None;
                }
            }
        };
        Some(Command::Game(action))
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_names(&KeyNames::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_gameplay_keys_only_while_playing() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command(press(KeyCode::Left), Phase::Playing),
            Some(Command::Game(Action::MoveLeft))
        );
        assert_eq!(keys.command(press(KeyCode::Left), Phase::Paused), None);
        assert_eq!(keys.command(press(KeyCode::Char(' ')), Phase::Menu), None);
    }

    #[test]
    fn test_pause_key_toggles_by_phase() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command(press(KeyCode::Char('P')), Phase::Playing),
            Some(Command::Game(Action::Pause))
        );
        assert_eq!(
            keys.command(press(KeyCode::Char('p')), Phase::Paused),
            Some(Command::Game(Action::Resume))
        );
        assert_eq!(keys.command(press(KeyCode::Char('p')), Phase::Menu), None);
    }

    #[test]
    fn test_start_only_from_menu_or_game_over() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command(press(KeyCode::Enter), Phase::GameOver),
            Some(Command::Game(Action::Start))
        );
        assert_eq!(keys.command(press(KeyCode::Enter), Phase::Playing), None);
    }

    #[test]
    fn test_quit_ends_game_before_exiting() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command(press(KeyCode::Char('q')), Phase::Playing),
            Some(Command::Game(Action::GameOver))
        );
        assert_eq!(
            keys.command(press(KeyCode::Char('q')), Phase::GameOver),
            Some(Command::Exit)
        );
        assert_eq!(
            keys.command(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Phase::Playing
            ),
            Some(Command::Exit)
        );
    }

    #[test]
    fn test_custom_names() {
        let names = KeyNames {
            rotate: vec!["x".to_string(), "bogus".to_string()],
            ..KeyNames::default()
        };
        let keys = KeyBindings::from_names(&names);
        assert_eq!(
            keys.command(press(KeyCode::Char('x')), Phase::Playing),
            Some(Command::Game(Action::Rotate))
        );
        assert_eq!(keys.command(press(KeyCode::Up), Phase::Playing), None);
    }
}
