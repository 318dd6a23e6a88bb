use super::key_buffer::KeyBuffer;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// How long a key stays pressed after the terminal reported it.
const TIMEOUT: Duration = Duration::from_millis(250);

/// How long to wait for input when no key is held.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(u8),
    Release(u8),
    TogglePause,
    Quit,
}

/// Turns terminal events into commands for the emulator.
pub struct KeyManager {
    key_buffer: KeyBuffer,
}

impl KeyManager {
    pub fn new() -> KeyManager {
        KeyManager {
            key_buffer: KeyBuffer::new(TIMEOUT),
        }
    }

    /// Wait for the next key event, or until a held key should be released.
    pub fn next_commands(&mut self) -> crossterm::Result<Vec<Command>> {
        let wait = self.key_buffer.next_expiry().unwrap_or(POLL_INTERVAL);

        let mut commands = Vec::new();
        if event::poll(wait)? {
            if let Event::Key(key_event) = event::read()? {
                log::debug!("Got key {:?}", key_event);
                commands.extend(self.command(key_event));
            }
        }

        commands.extend(self.key_buffer.expired().into_iter().map(Command::Release));
        Ok(commands)
    }

    fn command(&mut self, key_event: KeyEvent) -> Option<Command> {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('p') => Some(Command::TogglePause),
            code => {
                let key = key_to_u8(code)?;
                if self.key_buffer.press(key) {
                    Some(Command::Press(key))
                } else {
                    None
                }
            }
        }
    }
}

/// The CHIP-8 key for a hexadecimal digit.
fn key_to_u8(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::Char(c) => c.to_digit(16).map(|c| c as u8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('0') => Some(0x0))]
    #[test_case(KeyCode::Char('9') => Some(0x9))]
    #[test_case(KeyCode::Char('a') => Some(0xA))]
    #[test_case(KeyCode::Char('F') => Some(0xF))]
    #[test_case(KeyCode::Char('g') => None)]
    #[test_case(KeyCode::Enter => None)]
    fn hex_keys(code: KeyCode) -> Option<u8> {
        key_to_u8(code)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }

    #[test]
    fn commands() {
        let mut km = KeyManager::new();
        assert_eq!(
            Some(Command::Press(0xC)),
            km.command(key(KeyCode::Char('c'), KeyModifiers::NONE))
        );
        assert_eq!(None, km.command(key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert_eq!(
            Some(Command::Quit),
            km.command(key(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            Some(Command::TogglePause),
            km.command(key(KeyCode::Char('p'), KeyModifiers::NONE))
        );
        assert_eq!(Some(Command::Quit), km.command(key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }
}
