use super::opcode::Opcode;

pub const MEM_SIZE: usize = 4096;
pub const ROM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEM_SIZE - ROM_START as usize;
pub const FONT_SIZE: usize = 80;

/// Bytes per glyph in the font.
pub const GLYPH_SIZE: u16 = 5;

/// The usual hexadecimal font, 16 glyphs of 5 bytes each.
pub const DEFAULT_FONT: [u8; FONT_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Flat, byte addressable memory.
///
/// Reads outside of the address space return 0 and writes outside of it are dropped.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Create memory with the font copied to the start of it.
    pub fn new(font: &[u8; FONT_SIZE]) -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[..FONT_SIZE].copy_from_slice(font);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes.get(addr as usize).copied().unwrap_or(0)
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(byte) = self.bytes.get_mut(addr as usize) {
            *byte = value;
        }
    }

    /// Each opcode is two bytes, stored big-endian.
    pub fn read_opcode(&self, addr: u16) -> Opcode {
        Opcode::from_two_u8(self.read(addr), self.read(addr.wrapping_add(1)))
    }

    /// Copy `data` to `addr`, clipping whatever does not fit.
    /// Returns the number of bytes written.
    pub fn poke(&mut self, addr: u16, data: &[u8]) -> usize {
        let start = (addr as usize).min(MEM_SIZE);
        let len = data.len().min(MEM_SIZE - start);
        self.bytes[start..start + len].copy_from_slice(&data[..len]);
        if len < data.len() {
            log::warn!(
                "Clipped {} of {} bytes written at {:#05X}",
                data.len() - len,
                data.len(),
                addr
            );
        }
        len
    }

    /// Wipe the program area, then copy a program into memory at 0x200.
    pub fn load_rom(&mut self, program: &[u8]) {
        for byte in self.bytes[ROM_START as usize..].iter_mut() {
            *byte = 0;
        }
        self.poke(ROM_START, program);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
