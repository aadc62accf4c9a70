//! 4-bit unsigned values.
//!
//! Every register and every immediate operand of the TD4 is four bits
//! wide. [`Nibble`] can only be constructed by masking, so a value
//! outside `0..=15` is unrepresentable and arithmetic wraps the way the
//! hardware does.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 4-bit unsigned value (`0..=15`).
///
/// Deserialization funnels through [`From<u8>`], so restored values are
/// masked like every other construction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Nibble(u8);

impl Nibble {
    /// Number of bits.
    pub const WIDTH: usize = 4;

    /// Largest representable value (15).
    pub const MAX: Nibble = Nibble(0xF);

    /// The zero value.
    pub const fn zero() -> Self {
        Nibble(0)
    }

    /// Build a nibble from a byte, keeping only the low 4 bits.
    pub const fn from_u8(value: u8) -> Self {
        Nibble(value & 0xF)
    }

    /// The value as a byte (`0..=15`).
    pub const fn to_u8(self) -> u8 {
        self.0
    }

    /// 4-bit addition. Returns the wrapped sum and whether the true sum
    /// exceeded 15 (the carry out).
    pub const fn overflowing_add(self, rhs: Nibble) -> (Nibble, bool) {
        let sum = self.0 + rhs.0;
        (Nibble(sum & 0xF), sum > 0xF)
    }
}

impl From<u8> for Nibble {
    fn from(value: u8) -> Self {
        Nibble::from_u8(value)
    }
}

impl From<Nibble> for u8 {
    fn from(nibble: Nibble) -> u8 {
        nibble.0
    }
}

impl fmt::Display for Nibble {
    /// Formats as four binary digits, e.g. `0101`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_masks_to_four_bits() {
        for value in 0..=255u8 {
            assert_eq!(Nibble::from_u8(value).to_u8(), value & 0xF);
        }
    }

    #[test]
    fn test_overflowing_add() {
        assert_eq!(Nibble::from_u8(7).overflowing_add(Nibble::from_u8(8)), (Nibble::from_u8(15), false));
        assert_eq!(Nibble::from_u8(15).overflowing_add(Nibble::from_u8(1)), (Nibble::zero(), true));
        assert_eq!(Nibble::from_u8(8).overflowing_add(Nibble::from_u8(8)), (Nibble::zero(), true));
        assert_eq!(Nibble::from_u8(15).overflowing_add(Nibble::from_u8(15)), (Nibble::from_u8(14), true));
        assert_eq!(Nibble::zero().overflowing_add(Nibble::zero()), (Nibble::zero(), false));
    }

    #[test]
    fn test_overflowing_add_matches_wide_arithmetic() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                let (sum, carry) = Nibble::from_u8(a).overflowing_add(Nibble::from_u8(b));
                assert_eq!(sum.to_u8(), (a + b) & 0xF);
                assert_eq!(carry, a + b > 15);
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Nibble::zero().to_string(), "0000");
        assert_eq!(Nibble::from_u8(5).to_string(), "0101");
        assert_eq!(Nibble::MAX.to_string(), "1111");
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Nibble::default(), Nibble::zero());
    }

    #[test]
    fn test_deserialize_masks_like_construction() {
        let nibble: Nibble = serde_json::from_str("200").unwrap();
        assert_eq!(nibble, Nibble::from_u8(200));
        assert_eq!(nibble.to_u8(), 200 & 0xF);
        assert_eq!(nibble.to_string(), "1000");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Nibble::from_u8(9)).unwrap();
        assert_eq!(json, "9");
        let back: Nibble = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Nibble::from_u8(9));
    }
}
