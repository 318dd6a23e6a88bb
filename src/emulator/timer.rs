use super::hooks::Hooks;

/// Counts down once per frame until it reaches zero.
#[derive(Debug, Default)]
pub struct DelayTimer {
    timer: u8,
}

impl DelayTimer {
    pub fn new() -> DelayTimer {
        DelayTimer { timer: 0 }
    }

    pub fn get(&self) -> u8 {
        self.timer
    }

    pub fn set(&mut self, value: u8) {
        self.timer = value;
    }

    pub fn decrement(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }
}

/// Like the delay timer, but a tone plays while it is nonzero.
/// The host is told when to start and stop the tone through its hooks.
#[derive(Debug, Default)]
pub struct SoundTimer {
    timer: u8,
}

impl SoundTimer {
    pub fn new() -> SoundTimer {
        SoundTimer { timer: 0 }
    }

    pub fn get(&self) -> u8 {
        self.timer
    }

    pub fn set<H: Hooks>(&mut self, value: u8, hooks: &mut H) {
        self.timer = value;
        if self.timer > 0 {
            hooks.play_sound();
        }
    }

    pub fn decrement<H: Hooks>(&mut self, hooks: &mut H) {
        if self.timer > 0 {
            self.timer -= 1;
            if self.timer == 0 {
                hooks.stop_sound();
            }
        }
    }

    pub fn pause<H: Hooks>(&self, hooks: &mut H) {
        if self.timer > 0 {
            hooks.stop_sound();
        }
    }

    pub fn resume<H: Hooks>(&self, hooks: &mut H) {
        if self.timer > 0 {
            hooks.play_sound();
        }
    }

    pub fn reset<H: Hooks>(&mut self, hooks: &mut H) {
        if self.timer > 0 {
            hooks.stop_sound();
        }
        self.timer = 0;
    }
}
