//! The TD4 instruction memory.
//!
//! Sixteen words of eight bits each. Addresses are [`Nibble`]s, so every
//! access is in range by construction and reads can never fail. The
//! machine has no writable data memory; programs are loaded here once
//! and only read afterwards.

use crate::binary::{Nibble, Word8};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of instruction words the TD4 can hold.
pub const MEMORY_SIZE: usize = 16;

/// Instruction memory, 16 words addressed by a 4-bit program counter.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Memory {
    cells: [Word8; MEMORY_SIZE],
}

impl Memory {
    /// Fresh memory, all cells zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the word at `addr`.
    pub fn read(&self, addr: Nibble) -> Word8 {
        self.cells[addr.to_u8() as usize]
    }

    /// Write `value` at `addr`.
    pub fn write(&mut self, addr: Nibble, value: Word8) {
        self.cells[addr.to_u8() as usize] = value;
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.cells = [Word8::zero(); MEMORY_SIZE];
    }

    /// Load a program starting at address 0. At most 16 words are
    /// copied; anything beyond that is discarded. Cells past the end of
    /// the program are left zeroed.
    pub fn load(&mut self, program: &[Word8]) {
        self.clear();
        for (cell, word) in self.cells.iter_mut().zip(program) {
            *cell = *word;
        }
    }

    /// All 16 cells in address order.
    pub fn cells(&self) -> &[Word8; MEMORY_SIZE] {
        &self.cells
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let non_zero = self.cells.iter().filter(|w| **w != Word8::zero()).count();
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .field("non_zero_cells", &non_zero)
            .finish()
    }
}
