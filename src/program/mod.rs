//! Program text handling: parsing, disassembly and built-in demos.
//!
//! The TD4 has no assembler here; programs are written directly as
//! binary instruction words, one per line, with `//` comments. See
//! [`parser`] for the exact format.

pub mod demos;
pub mod disasm;
pub mod parser;

pub use disasm::{disassemble, disassemble_word};
pub use parser::{parse_program, ParseError};
