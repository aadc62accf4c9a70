//! The TD4 register file.
//!
//! Everything visible to a program lives here: the two general purpose
//! registers, the program counter, the output port latch and the carry
//! flag. All of them are four bits wide except the carry, which is a
//! single bit.

use crate::binary::Nibble;
use serde::{Deserialize, Serialize};

/// TD4 registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Registers {
    /// General purpose register A.
    pub a: Nibble,
    /// General purpose register B.
    pub b: Nibble,
    /// Program counter. Indexes the 16-word instruction memory.
    pub pc: Nibble,
    /// Output port latch. Holds the last value written by an OUT.
    pub out: Nibble,
    /// Carry flag. Written only by ADD; every other instruction leaves
    /// it untouched.
    pub carry: bool,
}

impl Registers {
    /// Fresh register file, everything zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all registers and clear the carry flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the program counter by one, wrapping modulo 16.
    /// Returns the address it held before the increment.
    pub fn advance_pc(&mut self) -> Nibble {
        let current = self.pc;
        // pc <= 15, so the u8 sum cannot overflow; from_u8 masks the wrap
        self.pc = Nibble::from_u8(current.to_u8() + 1);
        current
    }

    /// Load the program counter with an absolute address.
    pub fn jump(&mut self, addr: Nibble) {
        self.pc = addr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let regs = Registers::new();
        assert_eq!(regs.a, Nibble::zero());
        assert_eq!(regs.b, Nibble::zero());
        assert_eq!(regs.pc, Nibble::zero());
        assert_eq!(regs.out, Nibble::zero());
        assert!(!regs.carry);
    }

    #[test]
    fn test_advance_pc_returns_old_value() {
        let mut regs = Registers::new();
        regs.pc = Nibble::from_u8(5);
        let old = regs.advance_pc();
        assert_eq!(old.to_u8(), 5);
        assert_eq!(regs.pc.to_u8(), 6);
    }

    #[test]
    fn test_advance_pc_wraps_at_sixteen() {
        let mut regs = Registers::new();
        regs.pc = Nibble::MAX;
        let old = regs.advance_pc();
        assert_eq!(old.to_u8(), 15);
        assert_eq!(regs.pc.to_u8(), 0);
    }

    #[test]
    fn test_jump() {
        let mut regs = Registers::new();
        regs.jump(Nibble::from_u8(9));
        assert_eq!(regs.pc.to_u8(), 9);
    }

    #[test]
    fn test_reset() {
        let mut regs = Registers::new();
        regs.a = Nibble::from_u8(3);
        regs.b = Nibble::from_u8(7);
        regs.pc = Nibble::from_u8(12);
        regs.out = Nibble::MAX;
        regs.carry = true;
        regs.reset();
        assert_eq!(regs, Registers::new());
    }
}
