/// Choices between the behaviours that differ across historical interpreters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6` and `8XYE` shift `VY` into `VX`. When false, `VX` is shifted in place.
    pub shift_reads_vy: bool,
    /// `8XY1`, `8XY2` and `8XY3` set `VF` to 0.
    pub logic_resets_vf: bool,
    /// `FX55` and `FX65` leave `I` pointing past the last register copied.
    pub memory_increments_i: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            shift_reads_vy: true,
            logic_resets_vf: true,
            memory_increments_i: true,
        }
    }
}

/// Settings for a new emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per frame.
    pub ipf: u32,
    /// Frames per second.
    pub frame_rate: u32,
    /// How many messages may wait in the queue before senders block.
    pub queue_capacity: usize,
    /// How many messages are applied at the start of each frame.
    pub max_messages_per_frame: usize,
    pub quirks: Quirks,
    /// Seed for `CXNN`. A random seed is used if `None`.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ipf: 11,
            frame_rate: 60,
            queue_capacity: 64,
            max_messages_per_frame: 20,
            quirks: Quirks::default(),
            seed: None,
        }
    }
}
