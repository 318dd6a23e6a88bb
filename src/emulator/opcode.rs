/// A structure for splitting a two byte opcode
/// into its different fields, such as the register
/// nibbles, the 8-bit constant and the 12-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    pub fn new(value: u16) -> Opcode {
        Opcode(value)
    }

    /// Combine two bytes read from memory, big-endian.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Return the two u8-components as a tuple
    pub fn as_two_u8(&self) -> (u8, u8) {
        ((self.0 >> 8) as u8, (self.0 & 0x00FF) as u8)
    }

    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        let four_last_bits_mask = 0x0F;
        (
            (self.0 >> 12) as u8 & four_last_bits_mask,
            (self.0 >> 8) as u8 & four_last_bits_mask,
            (self.0 >> 4) as u8 & four_last_bits_mask,
            self.0 as u8 & four_last_bits_mask,
        )
    }

    pub fn x(&self) -> u8 {
        self.as_four_u8().1
    }

    pub fn y(&self) -> u8 {
        self.as_four_u8().2
    }

    pub fn n(&self) -> u8 {
        self.as_four_u8().3
    }

    pub fn nn(&self) -> u8 {
        self.as_two_u8().1
    }

    pub fn nnn(&self) -> u16 {
        self.0 & 0x0FFF
    }

    /// The canonical key used to look up the instruction.
    ///
    /// The top nibble selects the family. Families `0x8`, `0xE` and `0xF`
    /// keep the low nibble or byte since several instructions share them,
    /// and family `0x0` only has whole-word opcodes.
    pub fn key(&self) -> u16 {
        match self.0 & 0xF000 {
            0x0000 => self.0,
            0x8000 => self.0 & 0xF00F,
            0xE000 | 0xF000 => self.0 & 0xF0FF,
            family => family,
        }
    }
}
