//! # TD4 Emulator
//!
//! An emulator of the TD4, the 4-bit educational CPU from Iku Watanabe's
//! book "How to Build a CPU". The real machine is built from discrete
//! logic chips; this crate models it at the instruction level:
//!
//! - Two 4-bit general purpose registers (A and B)
//! - A 4-bit program counter that wraps modulo 16
//! - A 4-bit output port and a 1-bit carry flag
//! - 16 words of 8-bit instruction memory
//! - 12 instructions, each one word: opcode nibble plus immediate nibble
//!
//! There is no RAM and no ALU beyond a 4-bit adder. Programs move
//! values between registers, add immediates and branch on the carry
//! flag, which is enough for counters, blinkers and other LED toys.
//! That is the point of the machine.
//!
//! ## Quick start
//!
//! ```
//! use td4::{parse_program, Cpu};
//!
//! let program = parse_program(
//!     "
//!     0011 0000  // MOV A, 0
//!     0000 0001  // ADD A, 1
//!     1111 0001  // JMP 1
//!     ",
//! )
//! .unwrap();
//!
//! let mut cpu = Cpu::new();
//! cpu.load_program(&program);
//! cpu.run_limited(31);
//! assert_eq!(cpu.regs.a.to_u8(), 15);
//! ```
//!
//! ## Crate layout
//!
//! - [`binary`]: the 4-bit and 8-bit word types
//! - [`cpu`]: registers, memory, the decoder and the execution engine
//! - [`program`]: the binary text format, disassembler and built-in demos
//! - `tui` (feature `tui`, on by default): interactive terminal simulator
//! - `wasm` (feature `wasm`): WebAssembly bindings for browser front ends

pub mod binary;
pub mod cpu;
pub mod program;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use binary::{Nibble, Word8};
pub use cpu::{Cpu, CpuState, Instruction, Memory, Registers, Snapshot};
pub use program::{disassemble, disassemble_word, parse_program, ParseError};
