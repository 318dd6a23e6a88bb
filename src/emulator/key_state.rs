pub const NUM_KEYS: usize = 16;

/// The pressed state of the 16 keys of the keypad.
///
/// Releasing a key also records it as the last released key, which is what
/// `FX0A` waits for. That record is cleared once per frame by the frame loop.
pub struct KeyState {
    keys: [bool; NUM_KEYS],
    last_released: Option<u8>,
}

impl KeyState {
    pub fn new() -> KeyState {
        KeyState {
            keys: [false; NUM_KEYS],
            last_released: None,
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(state) => {
                *state = pressed;
                if !pressed {
                    self.last_released = Some(key);
                }
            }
            None => log::warn!("Ignoring state of unknown key {:#X}", key),
        }
    }

    pub fn last_released(&self) -> Option<u8> {
        self.last_released
    }

    pub fn clear_last_released(&mut self) {
        self.last_released = None;
    }

    pub fn reset(&mut self) {
        self.keys = [false; NUM_KEYS];
        self.clear_last_released();
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_recorded() {
        let mut keys = KeyState::new();
        keys.set(0xA, true);
        assert!(keys.is_pressed(0xA));
        assert_eq!(None, keys.last_released());

        keys.set(0xA, false);
        assert!(!keys.is_pressed(0xA));
        assert_eq!(Some(0xA), keys.last_released());

        keys.clear_last_released();
        assert_eq!(None, keys.last_released());
    }

    #[test]
    fn latest_release_wins() {
        let mut keys = KeyState::new();
        keys.set(1, false);
        keys.set(2, false);
        assert_eq!(Some(2), keys.last_released());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut keys = KeyState::new();
        keys.set(0x10, false);
        assert_eq!(None, keys.last_released());
        assert!(!keys.is_pressed(0x10));
    }

    #[test]
    fn reset_releases_everything_silently() {
        let mut keys = KeyState::new();
        keys.set(3, true);
        keys.set(4, false);
        keys.reset();
        assert!(!keys.is_pressed(3));
        assert_eq!(None, keys.last_released());
    }
}
