//! Disassembler for TD4 instruction words.

use crate::binary::Word8;
use crate::cpu::decode::{decode, Instruction};

/// Render one instruction word as assembly-style text.
///
/// Unassigned opcodes render as `??? ;` followed by the raw word.
pub fn disassemble_word(word: Word8) -> String {
    match decode(word) {
        Instruction::AddA { imm } => format!("ADD A, {}", imm.to_u8()),
        Instruction::MovAB => "MOV A, B".to_string(),
        Instruction::InA { imm } => format!("IN A, {}", imm.to_u8()),
        Instruction::MovA { imm } => format!("MOV A, {}", imm.to_u8()),
        Instruction::MovBA => "MOV B, A".to_string(),
        Instruction::AddB { imm } => format!("ADD B, {}", imm.to_u8()),
        Instruction::InB { imm } => format!("IN B, {}", imm.to_u8()),
        Instruction::MovB { imm } => format!("MOV B, {}", imm.to_u8()),
        Instruction::OutB => "OUT B".to_string(),
        Instruction::Out { imm } => format!("OUT {}", imm.to_u8()),
        Instruction::Jnc { addr } => format!("JNC {}", addr.to_u8()),
        Instruction::Jmp { addr } => format!("JMP {}", addr.to_u8()),
        Instruction::Unknown { .. } => format!("??? ; {}", word),
    }
}

/// Disassemble a program into an addressed listing.
///
/// Each line starts with the instruction word itself and carries the
/// address and mnemonic in a comment, so the listing is itself valid
/// program text and can be fed back to the parser.
pub fn disassemble(program: &[Word8]) -> String {
    let mut listing = format!("// td4 disassembly ({} words)\n", program.len());
    for (addr, word) in program.iter().enumerate() {
        listing.push_str(&format!(
            "{}  // {:X}: {}\n",
            word,
            addr,
            disassemble_word(*word)
        ));
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::parse_program;

    #[test]
    fn test_disassemble_known_words() {
        assert_eq!(disassemble_word(Word8::from_u8(0x01)), "ADD A, 1");
        assert_eq!(disassemble_word(Word8::from_u8(0x10)), "MOV A, B");
        assert_eq!(disassemble_word(Word8::from_u8(0x23)), "IN A, 3");
        assert_eq!(disassemble_word(Word8::from_u8(0x30)), "MOV A, 0");
        assert_eq!(disassemble_word(Word8::from_u8(0x40)), "MOV B, A");
        assert_eq!(disassemble_word(Word8::from_u8(0x5F)), "ADD B, 15");
        assert_eq!(disassemble_word(Word8::from_u8(0x66)), "IN B, 6");
        assert_eq!(disassemble_word(Word8::from_u8(0x72)), "MOV B, 2");
        assert_eq!(disassemble_word(Word8::from_u8(0x90)), "OUT B");
        assert_eq!(disassemble_word(Word8::from_u8(0xB7)), "OUT 7");
        assert_eq!(disassemble_word(Word8::from_u8(0xE0)), "JNC 0");
        assert_eq!(disassemble_word(Word8::from_u8(0xF1)), "JMP 1");
    }

    #[test]
    fn test_disassemble_unassigned_word() {
        assert_eq!(disassemble_word(Word8::from_u8(0x8F)), "??? ; 10001111");
        assert_eq!(disassemble_word(Word8::from_u8(0xC0)), "??? ; 11000000");
    }

    #[test]
    fn test_listing_contains_every_address() {
        let program: Vec<Word8> = [0x30u8, 0x40, 0x90, 0x01, 0xF1]
            .iter()
            .map(|b| Word8::from_u8(*b))
            .collect();
        let listing = disassemble(&program);
        assert!(listing.contains("// 0: MOV A, 0"));
        assert!(listing.contains("// 4: JMP 1"));
        assert_eq!(listing.lines().count(), 6);
    }

    #[test]
    fn test_listing_reparses_to_the_same_words() {
        let program: Vec<Word8> = (0..=255u8).step_by(17).map(Word8::from_u8).collect();
        let listing = disassemble(&program);
        assert_eq!(parse_program(&listing).unwrap(), program);
    }
}
