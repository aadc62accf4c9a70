//! 8-bit instruction words.
//!
//! A TD4 instruction is one byte: the upper nibble selects the operation
//! and the lower nibble is the immediate operand. Words render and parse
//! as eight binary digits, most significant bit first, which is the
//! notation the program file format uses.

use crate::binary::Nibble;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit instruction word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Word8(u8);

impl Word8 {
    /// Number of bits.
    pub const WIDTH: usize = 8;

    /// The zero word.
    pub const fn zero() -> Self {
        Word8(0)
    }

    /// Build a word from a raw byte.
    pub const fn from_u8(bits: u8) -> Self {
        Word8(bits)
    }

    /// The raw byte.
    pub const fn to_u8(self) -> u8 {
        self.0
    }

    /// Assemble a word from its two nibbles.
    pub const fn from_nibbles(opcode: Nibble, immediate: Nibble) -> Self {
        Word8((opcode.to_u8() << 4) | immediate.to_u8())
    }

    /// The upper nibble (bits 7..4), which selects the operation.
    pub const fn opcode(self) -> Nibble {
        Nibble::from_u8(self.0 >> 4)
    }

    /// The lower nibble (bits 3..0), the immediate operand.
    pub const fn immediate(self) -> Nibble {
        Nibble::from_u8(self.0)
    }

    /// Parse a word from exactly eight binary digits, most significant
    /// bit first. The caller is expected to have stripped whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use td4::binary::Word8;
    ///
    /// let word = Word8::from_binary_str("10010000").unwrap();
    /// assert_eq!(word.to_u8(), 0x90);
    /// ```
    pub fn from_binary_str(s: &str) -> Result<Self, ParseWordError> {
        let len = s.chars().count();
        if len != Self::WIDTH {
            return Err(ParseWordError::WrongLength {
                expected: Self::WIDTH,
                got: len,
            });
        }

        let mut bits = 0u8;
        for c in s.chars() {
            bits = (bits << 1)
                | match c {
                    '0' => 0,
                    '1' => 1,
                    _ => return Err(ParseWordError::InvalidChar(c)),
                };
        }

        Ok(Word8(bits))
    }
}

impl From<u8> for Word8 {
    fn from(bits: u8) -> Self {
        Word8(bits)
    }
}

impl From<Word8> for u8 {
    fn from(word: Word8) -> u8 {
        word.0
    }
}

impl fmt::Display for Word8 {
    /// Formats as eight binary digits, e.g. `10010000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

impl fmt::Debug for Word8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word8({:08b} = {:#04x})", self.0, self.0)
    }
}

/// Errors from parsing a binary word string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWordError {
    /// Wrong number of digits.
    WrongLength { expected: usize, got: usize },
    /// A character that is not `0` or `1`.
    InvalidChar(char),
}

impl fmt::Display for ParseWordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWordError::WrongLength { expected, got } => {
                write!(f, "expected {} binary digits, got {}", expected, got)
            }
            ParseWordError::InvalidChar(c) => {
                write!(f, "invalid binary digit: '{}' (expected 0 or 1)", c)
            }
        }
    }
}

impl std::error::Error for ParseWordError {}
