use super::error::Chip8Error;

pub const STACK_SIZE: usize = 16;

/// Return addresses pushed by `Call` and popped by `Return`.
pub struct CallStack {
    stack: [u16; STACK_SIZE],
    stack_pointer: usize,
}

impl CallStack {
    pub fn new() -> CallStack {
        CallStack {
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
        }
    }

    /// Push a return address. `pc` is the address of the call, used for error reporting.
    pub fn push(&mut self, addr: u16, pc: u16) -> Result<(), Chip8Error> {
        let slot = self
            .stack
            .get_mut(self.stack_pointer)
            .ok_or(Chip8Error::StackOverflow { pc })?;
        *slot = addr;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self, pc: u16) -> Result<u16, Chip8Error> {
        if self.stack_pointer == 0 {
            return Err(Chip8Error::StackUnderflow { pc });
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }

    pub fn len(&self) -> usize {
        self.stack_pointer
    }

    pub fn is_empty(&self) -> bool {
        self.stack_pointer == 0
    }

    pub fn clear(&mut self) {
        self.stack = [0; STACK_SIZE];
        self.stack_pointer = 0;
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
