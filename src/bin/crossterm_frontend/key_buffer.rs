use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Keeps track of which keys are held down.
///
/// Terminals only report key presses, so a key counts as released
/// once `timeout` has passed without it being pressed again.
pub struct KeyBuffer {
    timeout: Duration,
    held: VecDeque<(u8, Instant)>,
}

impl KeyBuffer {
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            held: VecDeque::new(),
        }
    }

    /// Record a keypress. Returns false if the key was already held,
    /// in which case only its release is postponed.
    pub fn press(&mut self, key: u8) -> bool {
        self.press_at(key, Instant::now())
    }

    fn press_at(&mut self, key: u8, now: Instant) -> bool {
        let held = self.held.iter().position(|(k, _)| *k == key);
        if let Some(index) = held {
            self.held.remove(index);
        }
        self.held.push_back((key, now));
        held.is_none()
    }

    /// Remove and return the keys that should be released by now, oldest first.
    pub fn expired(&mut self) -> Vec<u8> {
        self.expired_at(Instant::now())
    }

    fn expired_at(&mut self, now: Instant) -> Vec<u8> {
        let mut keys = Vec::new();
        while let Some(&(key, pressed_at)) = self.held.front() {
            if now.saturating_duration_since(pressed_at) < self.timeout {
                break;
            }
            self.held.pop_front();
            keys.push(key);
        }
        keys
    }

    /// How long until the oldest held key should be released.
    pub fn next_expiry(&self) -> Option<Duration> {
        self.held.front().map(|&(_, pressed_at)| {
            (pressed_at + self.timeout).saturating_duration_since(Instant::now())
        })
    }
}
