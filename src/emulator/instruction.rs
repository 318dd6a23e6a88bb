use super::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,                   // 00E0
    Return,                        // 00EE
    Goto(Addr),                    // 1NNN
    Call(Addr),                    // 2NNN
    IfRegEqConst(Reg, Const),      // 3XNN
    IfRegNeqConst(Reg, Const),     // 4XNN
    IfRegEqReg(Reg, Reg),          // 5XY0
    SetRegToConst(Reg, Const),     // 6XNN
    IncRegByConst(Reg, Const),     // 7XNN
    SetRegToReg(Reg, Reg),         // 8XY0
    BitwiseOr(Reg, Reg),           // 8XY1
    BitwiseAnd(Reg, Reg),          // 8XY2
    BitwiseXor(Reg, Reg),          // 8XY3
    IncRegByReg(Reg, Reg),         // 8XY4
    DecRegByReg(Reg, Reg),         // 8XY5
    BitshiftRight(Reg, Reg),       // 8XY6
    SetVxVyMinusVx(Reg, Reg),      // 8XY7
    BitshiftLeft(Reg, Reg),        // 8XYE
    IfRegNeqReg(Reg, Reg),         // 9XY0
    SetI(Addr),                    // ANNN
    SetPcToV0PlusAddr(Addr),       // BNNN
    SetVxRand(Reg, Const),         // CXNN
    Draw(Reg, Reg, Const),         // DXYN
    IfKeyEqVx(Reg),                // EX9E
    IfKeyNeqVx(Reg),               // EXA1
    SetRegToDelayTimer(Reg),       // FX07
    SetRegToGetKey(Reg),           // FX0A
    SetDelayTimerToReg(Reg),       // FX15
    SetSoundTimerToReg(Reg),       // FX18
    AddRegToI(Reg),                // FX1E
    SetIToSpriteAddrVx(Reg),       // FX29
    SetIToBcdOfReg(Reg),           // FX33
    RegDump(Reg),                  // FX55
    RegLoad(Reg),                  // FX65
}

impl Instruction {
    /// Decode an opcode, or `None` if it is not part of the instruction set.
    pub fn decode(value: u16) -> Option<Instruction> {
        let opcode = Opcode::new(value);
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let nn = Const(opcode.nn());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.key() {
            0x00E0 => Instruction::ClearScreen,
            0x00EE => Instruction::Return,
            0x1000 => Instruction::Goto(nnn),
            0x2000 => Instruction::Call(nnn),
            0x3000 => Instruction::IfRegEqConst(x, nn),
            0x4000 => Instruction::IfRegNeqConst(x, nn),
            0x5000 if opcode.n() == 0 => Instruction::IfRegEqReg(x, y),
            0x6000 => Instruction::SetRegToConst(x, nn),
            0x7000 => Instruction::IncRegByConst(x, nn),
            0x8000 => Instruction::SetRegToReg(x, y),
            0x8001 => Instruction::BitwiseOr(x, y),
            0x8002 => Instruction::BitwiseAnd(x, y),
            0x8003 => Instruction::BitwiseXor(x, y),
            0x8004 => Instruction::IncRegByReg(x, y),
            0x8005 => Instruction::DecRegByReg(x, y),
            0x8006 => Instruction::BitshiftRight(x, y),
            0x8007 => Instruction::SetVxVyMinusVx(x, y),
            0x800E => Instruction::BitshiftLeft(x, y),
            0x9000 if opcode.n() == 0 => Instruction::IfRegNeqReg(x, y),
            0xA000 => Instruction::SetI(nnn),
            0xB000 => Instruction::SetPcToV0PlusAddr(nnn),
            0xC000 => Instruction::SetVxRand(x, nn),
            0xD000 => Instruction::Draw(x, y, Const(opcode.n())),
            0xE09E => Instruction::IfKeyEqVx(x),
            0xE0A1 => Instruction::IfKeyNeqVx(x),
            0xF007 => Instruction::SetRegToDelayTimer(x),
            0xF00A => Instruction::SetRegToGetKey(x),
            0xF015 => Instruction::SetDelayTimerToReg(x),
            0xF018 => Instruction::SetSoundTimerToReg(x),
            0xF01E => Instruction::AddRegToI(x),
            0xF029 => Instruction::SetIToSpriteAddrVx(x),
            0xF033 => Instruction::SetIToBcdOfReg(x),
            0xF055 => Instruction::RegDump(x),
            0xF065 => Instruction::RegLoad(x),
            _ => return None,
        };

        Some(instruction)
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(Opcode::from_two_u8(left, right).as_u16())
    }

    /// Whether this instruction ends the frame's instruction batch.
    pub fn is_draw(&self) -> bool {
        matches!(self, Instruction::Draw(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn opcodes_are_parsed_correctly() {
        let expected = [
            (0x00E0, Instruction::ClearScreen),
            (0x00EE, Instruction::Return),
            (0x1025, Instruction::Goto(Addr(0x25))),
            (0x2037, Instruction::Call(Addr(0x37))),
            (0x3A08, Instruction::IfRegEqConst(Reg(0xA), Const(8))),
            (0x4A08, Instruction::IfRegNeqConst(Reg(0xA), Const(8))),
            (0x5AB0, Instruction::IfRegEqReg(Reg(0xA), Reg(0xB))),
            (0x6B23, Instruction::SetRegToConst(Reg(0xB), Const(0x23))),
            (0x7CA1, Instruction::IncRegByConst(Reg(0xC), Const(0xA1))),
            (0x8AB0, Instruction::SetRegToReg(Reg(0xA), Reg(0xB))),
            (0x8DE1, Instruction::BitwiseOr(Reg(0xD), Reg(0xE))),
            (0x8DE2, Instruction::BitwiseAnd(Reg(0xD), Reg(0xE))),
            (0x8DE3, Instruction::BitwiseXor(Reg(0xD), Reg(0xE))),
            (0x8AB4, Instruction::IncRegByReg(Reg(0xA), Reg(0xB))),
            (0x8AB5, Instruction::DecRegByReg(Reg(0xA), Reg(0xB))),
            (0x8AB6, Instruction::BitshiftRight(Reg(0xA), Reg(0xB))),
            (0x8AB7, Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB))),
            (0x8A0E, Instruction::BitshiftLeft(Reg(0xA), Reg(0x0))),
            (0x9AB0, Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB))),
            (0xA025, Instruction::SetI(Addr(0x25))),
            (0xB025, Instruction::SetPcToV0PlusAddr(Addr(0x25))),
            (0xCA23, Instruction::SetVxRand(Reg(0xA), Const(0x23))),
            (0xDABC, Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC))),
            (0xEA9E, Instruction::IfKeyEqVx(Reg(0xA))),
            (0xEAA1, Instruction::IfKeyNeqVx(Reg(0xA))),
            (0xFA07, Instruction::SetRegToDelayTimer(Reg(0xA))),
            (0xFA0A, Instruction::SetRegToGetKey(Reg(0xA))),
            (0xFA15, Instruction::SetDelayTimerToReg(Reg(0xA))),
            (0xFA18, Instruction::SetSoundTimerToReg(Reg(0xA))),
            (0xFA1E, Instruction::AddRegToI(Reg(0xA))),
            (0xFA29, Instruction::SetIToSpriteAddrVx(Reg(0xA))),
            (0xFA33, Instruction::SetIToBcdOfReg(Reg(0xA))),
            (0xFA55, Instruction::RegDump(Reg(0xA))),
            (0xFA65, Instruction::RegLoad(Reg(0xA))),
        ];

        for (opcode, instruction) in expected.iter() {
            assert_eq!(Some(*instruction), Instruction::decode(*opcode), "{:#06X}", opcode);
        }
    }

    #[test]
    fn from_two_u8_equals_decode() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::decode(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::decode(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0xF0, 0x65), Instruction::decode(0xF065));
    }

    #[test_case(0x0000 ; "zero word")]
    #[test_case(0x0123 ; "machine code call")]
    #[test_case(0x00E1 ; "near clear screen")]
    #[test_case(0x5AB1 ; "register skip with nonzero low nibble")]
    #[test_case(0x9AB7 ; "register mismatch skip with nonzero low nibble")]
    #[test_case(0x8AB8 ; "undefined alu op")]
    #[test_case(0xE19F ; "undefined key skip")]
    #[test_case(0xF175 ; "undefined misc op")]
    #[test_case(0xFFFF ; "all ones")]
    fn unknown_opcodes_are_rejected(opcode: u16) {
        assert_eq!(None, Instruction::decode(opcode));
    }

    #[test]
    fn exactly_thirty_four_keys_decode() {
        let mut keys: Vec<u16> = (0..=0xFFFFu16)
            .filter(|op| Instruction::decode(*op).is_some())
            .map(|op| Opcode::new(op).key())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(34, keys.len());
    }

    proptest! {
        #[test]
        fn decode_never_panics(opcode in any::<u16>()) {
            let _ = Instruction::decode(opcode);
        }

        #[test]
        fn draw_height_is_low_nibble(x in 0u8..16, y in 0u8..16, n in 0u8..16) {
            let opcode = 0xD000 | (x as u16) << 8 | (y as u16) << 4 | n as u16;
            prop_assert_eq!(
                Some(Instruction::Draw(Reg(x), Reg(y), Const(n))),
                Instruction::decode(opcode)
            );
        }
    }
}
