//! Binary primitives for the TD4.
//!
//! The TD4 is a 4-bit machine: registers and immediates are [`Nibble`]s,
//! instruction words are [`Word8`]s. Both types render as fixed-width
//! binary digit strings via their `Display` impls, which is the notation
//! used everywhere in this crate (program files, disassembly, the TUI).

mod nibble;
mod word;

pub use nibble::Nibble;
pub use word::{ParseWordError, Word8};
