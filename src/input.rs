use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// Logical key state as the engine sees it: one flag per hex key 0x0-0xF.
/// The host's input layer is the only writer; the engine reads the flags,
/// and clears exactly one when the wait-for-key instruction consumes it.
#[derive(Default)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad { keys: [false; 16] }
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xf) as usize] = pressed;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xf) as usize]
    }

    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    /// lowest-numbered key currently down, if any
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|i| i as u8)
    }

    pub fn clear(&mut self) {
        self.keys = [false; 16];
    }
}

/// map of characters read from the terminal to logical key indices, using
/// the left-hand side of a qwerty keyboard to mimic the 4x4 hex pad:
///   1 2 3 4      1 2 3 C
///   q w e r  ->  4 5 6 D
///   a s d f      7 8 9 E
///   z x c v      A 0 B F
const CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('4', 0xc),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('r', 0xd),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('f', 0xe),
    ('z', 0xa),
    ('x', 0x0),
    ('c', 0xb),
    ('v', 0xf),
];

/// Host-side source of keypresses, already mapped to logical indices.
pub trait Input {
    /// get the mapped keys that have been pressed recently, without
    /// flushing them from the buffer
    fn peek_keys(&mut self) -> Result<&[u8], io::Error>;

    /// flush all the keypresses from the buffer
    fn flush_keys(&mut self) -> Result<(), io::Error>;

    /// whether the user asked to leave the emulator
    fn quit_requested(&self) -> bool {
        false
    }
}

/// simple implementation of Input, reading terminal events from STDIN
pub struct StdinInput {
    buffer: Vec<u8>,
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            buffer: Vec::new(),
            keymap: HashMap::from(CONVENTIONAL_KEYMAP),
            quit: false,
        })
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char(key) => {
                        if let Some(mapped_key) = self.keymap.get(&key) {
                            self.buffer.push(*mapped_key);
                        }
                    }
                    KeyCode::Esc => self.quit = true,
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        self.read_stdin()?;
        Ok(self.buffer.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.read_stdin()?;
        self.buffer.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    bytes: Vec<u8>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            bytes: Vec::from(keys),
        }
    }
}

impl Input for DummyInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        Ok(self.bytes.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.bytes.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_set_and_read() {
        let mut k = Keypad::new();
        k.set_key(0x3, true);
        assert!(k.is_pressed(0x3));
        assert!(!k.is_pressed(0x4));
        k.set_key(0x3, false);
        assert!(!k.is_pressed(0x3));
    }

    #[test]
    fn test_first_pressed_prefers_lowest() {
        let mut k = Keypad::new();
        assert_eq!(k.first_pressed(), None);
        k.set_key(0xa, true);
        k.set_key(0x5, true);
        assert_eq!(k.first_pressed(), Some(0x5));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut k = Keypad::new();
        k.set_key(0x0, true);
        k.set_key(0xf, true);
        k.clear();
        assert_eq!(k.keys(), &[false; 16]);
    }

    #[test]
    fn test_dummy_input_peek_then_flush() {
        let mut i = DummyInput::new(&[0x1, 0x2]);
        assert_eq!(i.peek_keys().unwrap(), &[0x1, 0x2]);
        i.flush_keys().unwrap();
        assert_eq!(i.peek_keys().unwrap(), &[] as &[u8]);
    }
}
