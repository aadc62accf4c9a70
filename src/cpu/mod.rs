//! CPU emulation for the TD4.
//!
//! The machine model is deliberately tiny: two 4-bit general purpose
//! registers, a 4-bit program counter that wraps modulo 16, a 4-bit
//! output port, a 1-bit carry flag and 16 words of read-only
//! instruction memory. [`Cpu::step`] executes exactly one instruction;
//! anything longer-running is built on top of it by the callers.

pub mod decode;
pub mod execute;
pub mod memory;
pub mod registers;

pub use decode::{decode, encode, Instruction};
pub use execute::{Cpu, CpuState, Snapshot};
pub use memory::{Memory, MEMORY_SIZE};
pub use registers::Registers;
