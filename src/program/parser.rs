//! Parser for the TD4 program text format.
//!
//! Programs are written one instruction per line as eight binary
//! digits, most significant bit first. Whitespace inside a line is
//! ignored, so the conventional `0011 0000` nibble spacing works.
//! `//` starts a comment, either on a line of its own or after an
//! instruction:
//!
//! ```text
//! // count up on the output port
//! 0011 0000  // MOV A, 0
//! 0100 0000  // MOV B, A
//! 1001 0000  // OUT B
//! 0000 0001  // ADD A, 1
//! 1111 0001  // JMP 1
//! ```

use crate::binary::{ParseWordError, Word8};
use thiserror::Error;

/// Raised when a program line does not reduce to a valid instruction
/// word.
#[derive(Debug, Clone, Error)]
#[error("invalid instruction on line {line}: `{text}` ({source})")]
pub struct ParseError {
    /// 1-based line number in the source text.
    pub line: usize,
    /// The offending instruction text as written, comments stripped.
    pub text: String,
    /// What was wrong with it.
    pub source: ParseWordError,
}

/// Parse program text into instruction words.
///
/// Blank lines and comment lines are skipped. Every remaining line must
/// reduce to exactly eight binary digits once comments and whitespace
/// are removed. The result holds one word per instruction line, in
/// order; it may be longer than the 16-word instruction memory, in
/// which case loading truncates it.
pub fn parse_program(text: &str) -> Result<Vec<Word8>, ParseError> {
    let mut program = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();

        // Skip blank lines and whole-line comments
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        // Cut off an inline comment
        let instr_text = match trimmed.find("//") {
            Some(pos) => trimmed[..pos].trim(),
            None => trimmed,
        };

        // Digits may be grouped with spaces or tabs; drop them all
        let cleaned: String = instr_text.chars().filter(|c| !c.is_whitespace()).collect();

        let word = Word8::from_binary_str(&cleaned).map_err(|source| ParseError {
            line: idx + 1,
            text: instr_text.to_string(),
            source,
        })?;

        program.push(word);
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain_lines() {
        let program = parse_program("00000001\n11110000\n").unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program[0].to_u8(), 0x01);
        assert_eq!(program[1].to_u8(), 0xF0);
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(parse_program("").unwrap(), Vec::new());
        assert_eq!(parse_program("\n\n  \n").unwrap(), Vec::new());
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let text = "\
// counter example

0011 0000  // MOV A, 0
   // indented comment
0100 0000\t// tab before the comment

1001 0000
";
        let program = parse_program(text).unwrap();
        let bytes: Vec<u8> = program.iter().map(|w| w.to_u8()).collect();
        assert_eq!(bytes, vec![0x30, 0x40, 0x90]);
    }

    #[test]
    fn test_ignores_interior_whitespace() {
        let program = parse_program("0011 0000\n1 1 1 1 0 0 0 1\n\t0000\t0001\n").unwrap();
        let bytes: Vec<u8> = program.iter().map(|w| w.to_u8()).collect();
        assert_eq!(bytes, vec![0x30, 0xF1, 0x01]);
    }

    #[test]
    fn test_rejects_seven_digit_line() {
        let err = parse_program("00110000\n0011000\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.text, "0011000");
        assert_eq!(
            err.source,
            ParseWordError::WrongLength { expected: 8, got: 7 }
        );
    }

    #[test]
    fn test_rejects_nine_digit_line() {
        let err = parse_program("001100000").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(
            err.source,
            ParseWordError::WrongLength { expected: 8, got: 9 }
        );
    }

    #[test]
    fn test_rejects_non_binary_digits() {
        let err = parse_program("0011000x").unwrap_err();
        assert_eq!(err.source, ParseWordError::InvalidChar('x'));

        let err = parse_program("00110002").unwrap_err();
        assert_eq!(err.source, ParseWordError::InvalidChar('2'));
    }

    #[test]
    fn test_error_reports_text_before_whitespace_removal() {
        let err = parse_program("// header\n0011 000  // short\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.text, "0011 000");
        assert_eq!(
            err.source,
            ParseWordError::WrongLength { expected: 8, got: 7 }
        );
    }

    #[test]
    fn test_error_message_names_the_line() {
        let err = parse_program("00001111\n\nabc\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 3"), "unexpected message: {message}");
        assert!(message.contains("abc"), "unexpected message: {message}");
    }

    #[test]
    fn test_may_exceed_memory_capacity() {
        let text = "00000000\n".repeat(20);
        assert_eq!(parse_program(&text).unwrap().len(), 20);
    }

    proptest! {
        /// Rendering arbitrary bytes as binary lines and parsing them
        /// back is lossless, with or without nibble spacing.
        #[test]
        fn test_roundtrips_rendered_words(bytes in proptest::collection::vec(any::<u8>(), 0..24)) {
            let plain: String = bytes
                .iter()
                .map(|b| format!("{:08b}\n", b))
                .collect();
            let parsed = parse_program(&plain).unwrap();
            prop_assert_eq!(
                parsed.iter().map(|w| w.to_u8()).collect::<Vec<_>>(),
                bytes.clone()
            );

            let spaced: String = bytes
                .iter()
                .map(|b| format!("{:04b} {:04b}  // data\n", b >> 4, b & 0xF))
                .collect();
            let parsed = parse_program(&spaced).unwrap();
            prop_assert_eq!(
                parsed.iter().map(|w| w.to_u8()).collect::<Vec<_>>(),
                bytes
            );
        }
    }
}
