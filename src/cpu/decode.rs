//! Instruction decoding for the TD4.
//!
//! An instruction word is one byte: the upper nibble selects the
//! operation, the lower nibble is a 4-bit immediate that serves as a
//! literal operand or a jump target. Decoding is total. The four
//! opcodes the hardware leaves unassigned decode to
//! [`Instruction::Unknown`], which halts the machine when executed.

use crate::binary::{Nibble, Word8};
use serde::{Deserialize, Serialize};

/// A decoded TD4 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// `ADD A, Im`: A = A + Im, carry set iff the unmasked sum exceeds 15.
    AddA { imm: Nibble },
    /// `MOV A, B`: A = B.
    MovAB,
    /// `IN A`: A = Im. Input is modeled as the immediate field.
    InA { imm: Nibble },
    /// `MOV A, Im`: A = Im.
    MovA { imm: Nibble },
    /// `MOV B, A`: B = A.
    MovBA,
    /// `ADD B, Im`: B = B + Im, carry set iff the unmasked sum exceeds 15.
    AddB { imm: Nibble },
    /// `IN B`: B = Im. Input is modeled as the immediate field.
    InB { imm: Nibble },
    /// `MOV B, Im`: B = Im.
    MovB { imm: Nibble },
    /// `OUT B`: OUT = B.
    OutB,
    /// `OUT Im`: OUT = Im.
    Out { imm: Nibble },
    /// `JNC Im`: PC = Im if the carry flag is clear, otherwise no effect.
    Jnc { addr: Nibble },
    /// `JMP Im`: PC = Im.
    Jmp { addr: Nibble },
    /// An opcode with no assigned operation (0x8, 0xA, 0xC or 0xD).
    /// Executing it halts the machine.
    Unknown { opcode: Nibble },
}

/// Decode an instruction word. Never fails.
pub fn decode(word: Word8) -> Instruction {
    let imm = word.immediate();
    match word.opcode().to_u8() {
        0x0 => Instruction::AddA { imm },
        0x1 => Instruction::MovAB,
        0x2 => Instruction::InA { imm },
        0x3 => Instruction::MovA { imm },
        0x4 => Instruction::MovBA,
        0x5 => Instruction::AddB { imm },
        0x6 => Instruction::InB { imm },
        0x7 => Instruction::MovB { imm },
        0x9 => Instruction::OutB,
        0xB => Instruction::Out { imm },
        0xE => Instruction::Jnc { addr: imm },
        0xF => Instruction::Jmp { addr: imm },
        _ => Instruction::Unknown {
            opcode: word.opcode(),
        },
    }
}

/// Encode an instruction back into its word form.
///
/// Operations without an operand get a zero immediate, so `encode` is
/// the inverse of [`decode`] only for canonical words.
pub fn encode(instr: &Instruction) -> Word8 {
    let (opcode, imm) = match *instr {
        Instruction::AddA { imm } => (0x0, imm),
        Instruction::MovAB => (0x1, Nibble::zero()),
        Instruction::InA { imm } => (0x2, imm),
        Instruction::MovA { imm } => (0x3, imm),
        Instruction::MovBA => (0x4, Nibble::zero()),
        Instruction::AddB { imm } => (0x5, imm),
        Instruction::InB { imm } => (0x6, imm),
        Instruction::MovB { imm } => (0x7, imm),
        Instruction::OutB => (0x9, Nibble::zero()),
        Instruction::Out { imm } => (0xB, imm),
        Instruction::Jnc { addr } => (0xE, addr),
        Instruction::Jmp { addr } => (0xF, addr),
        Instruction::Unknown { opcode } => (opcode.to_u8(), Nibble::zero()),
    };
    Word8::from_nibbles(Nibble::from_u8(opcode), imm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn imm(value: u8) -> Nibble {
        Nibble::from_u8(value)
    }

    #[test]
    fn test_decode_assigned_opcodes() {
        assert_eq!(decode(Word8::from_u8(0x01)), Instruction::AddA { imm: imm(1) });
        assert_eq!(decode(Word8::from_u8(0x10)), Instruction::MovAB);
        assert_eq!(decode(Word8::from_u8(0x23)), Instruction::InA { imm: imm(3) });
        assert_eq!(decode(Word8::from_u8(0x3F)), Instruction::MovA { imm: imm(15) });
        assert_eq!(decode(Word8::from_u8(0x40)), Instruction::MovBA);
        assert_eq!(decode(Word8::from_u8(0x52)), Instruction::AddB { imm: imm(2) });
        assert_eq!(decode(Word8::from_u8(0x67)), Instruction::InB { imm: imm(7) });
        assert_eq!(decode(Word8::from_u8(0x74)), Instruction::MovB { imm: imm(4) });
        assert_eq!(decode(Word8::from_u8(0x90)), Instruction::OutB);
        assert_eq!(decode(Word8::from_u8(0xB7)), Instruction::Out { imm: imm(7) });
        assert_eq!(decode(Word8::from_u8(0xE3)), Instruction::Jnc { addr: imm(3) });
        assert_eq!(decode(Word8::from_u8(0xF1)), Instruction::Jmp { addr: imm(1) });
    }

    #[test]
    fn test_decode_unassigned_opcodes() {
        for opcode in [0x8u8, 0xA, 0xC, 0xD] {
            let word = Word8::from_nibbles(imm(opcode), imm(0xF));
            assert_eq!(
                decode(word),
                Instruction::Unknown { opcode: imm(opcode) }
            );
        }
    }

    #[test]
    fn test_encode_decode_roundtrip_canonical() {
        let instructions = [
            Instruction::AddA { imm: imm(1) },
            Instruction::MovAB,
            Instruction::InA { imm: imm(9) },
            Instruction::MovA { imm: imm(15) },
            Instruction::MovBA,
            Instruction::AddB { imm: imm(5) },
            Instruction::InB { imm: imm(2) },
            Instruction::MovB { imm: imm(8) },
            Instruction::OutB,
            Instruction::Out { imm: imm(15) },
            Instruction::Jnc { addr: imm(0) },
            Instruction::Jmp { addr: imm(12) },
            Instruction::Unknown { opcode: imm(0xC) },
        ];
        for instr in instructions {
            assert_eq!(decode(encode(&instr)), instr);
        }
    }

    proptest! {
        /// decode(encode(i)) is the identity on decoded instructions,
        /// for every possible instruction word.
        #[test]
        fn test_decode_encode_stable(bits in any::<u8>()) {
            let instr = decode(Word8::from_u8(bits));
            prop_assert_eq!(decode(encode(&instr)), instr);
        }

        /// Branch targets always come from the low nibble.
        #[test]
        fn test_jump_targets_are_low_nibble(target in 0u8..16) {
            let jmp = Word8::from_nibbles(imm(0xF), imm(target));
            prop_assert_eq!(decode(jmp), Instruction::Jmp { addr: imm(target) });
            let jnc = Word8::from_nibbles(imm(0xE), imm(target));
            prop_assert_eq!(decode(jnc), Instruction::Jnc { addr: imm(target) });
        }
    }
}
