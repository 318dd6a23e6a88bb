use thiserror::Error;

/// Errors raised by the machine or by the host when submitting commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at {pc:#05X} exceeds the call depth")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("key {0:#X} is not on the keypad")]
    InvalidKey(u8),

    #[error("message queue is full")]
    QueueFull,

    #[error("the emulator is gone")]
    Disconnected,
}

impl Chip8Error {
    /// Whether the error halts the machine, as opposed to being rejected at submission.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Chip8Error::UnknownOpcode { .. }
                | Chip8Error::StackOverflow { .. }
                | Chip8Error::StackUnderflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_faults_are_fatal() {
        assert!(Chip8Error::UnknownOpcode { opcode: 0, pc: 0x200 }.is_fatal());
        assert!(Chip8Error::StackOverflow { pc: 0x200 }.is_fatal());
        assert!(!Chip8Error::QueueFull.is_fatal());
        assert!(!Chip8Error::InvalidKey(0x10).is_fatal());
    }

    #[test]
    fn messages_name_the_opcode() {
        let error = Chip8Error::UnknownOpcode { opcode: 0xFFFF, pc: 0x2A0 };
        assert_eq!("unknown opcode 0xFFFF at 0x2A0", error.to_string());
    }
}
