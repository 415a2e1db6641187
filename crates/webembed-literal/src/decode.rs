//! Reference decoder for adjacent C string-literal segments.
//!
//! Reads segments the way a C compiler does: escapes are resolved per segment before the
//! segments are joined, and `\x` takes every hex digit that follows it. The result is the
//! bytes stored in the array: `\xNN` is the single byte `NN`, universal character names and
//! plain characters are stored as UTF-8.

use std::iter::Peekable;
use std::str::Chars;

/// Errors found while decoding literal segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Segment {segment}: lone backslash at end of literal")]
    DanglingBackslash { segment: usize },

    #[error("Segment {segment}: \\x escape without hex digits")]
    EmptyHex { segment: usize },

    #[error("Segment {segment}: hex escape \\x{digits} does not fit in a byte")]
    HexOutOfRange { segment: usize, digits: String },

    #[error("Segment {segment}: universal character name needs {expected} hex digits")]
    TruncatedUniversal { segment: usize, expected: usize },

    #[error("Segment {segment}: U+{value:X} is not a valid code point")]
    InvalidCodePoint { segment: usize, value: u32 },

    #[error("Segment {segment}: unknown escape sequence \\{escape}")]
    UnknownEscape { segment: usize, escape: char },
}

/// Decode the segments and join them into the bytes a C compiler would store, without the
/// terminating NUL.
pub fn decode_segments<S: AsRef<str>>(segments: &[S]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::new();
    for (segment, text) in segments.iter().enumerate() {
        decode_segment(segment, text.as_ref(), &mut out)?;
    }
    Ok(out)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn decode_segment(segment: usize, text: &str, out: &mut Vec<u8>) -> Result<(), DecodeError> {
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(out, c);
            continue;
        }

        let Some(escape) = chars.next() else {
            return Err(DecodeError::DanglingBackslash { segment });
        };

        let byte = match escape {
            '\\' | '"' | '\'' | '?' => escape as u8,
            'n' => b'\n',
            'r' => b'\r',
            't' => b'\t',
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0c,
            'v' => 0x0b,
            'x' => {
                let mut digits = String::new();
                while let Some(d) = chars.next_if(char::is_ascii_hexdigit) {
                    digits.push(d);
                }
                if digits.is_empty() {
                    return Err(DecodeError::EmptyHex { segment });
                }
                match u32::from_str_radix(&digits, 16) {
                    Ok(value) if value <= 0xFF => value as u8,
                    _ => return Err(DecodeError::HexOutOfRange { segment, digits }),
                }
            }
            'u' => {
                push_char(out, universal(segment, &mut chars, 4)?);
                continue;
            }
            'U' => {
                push_char(out, universal(segment, &mut chars, 8)?);
                continue;
            }
            other => return Err(DecodeError::UnknownEscape { segment, escape: other }),
        };
        out.push(byte);
    }

    Ok(())
}

/// Read exactly `width` hex digits of a universal character name.
fn universal(
    segment: usize,
    chars: &mut Peekable<Chars<'_>>,
    width: usize,
) -> Result<char, DecodeError> {
    let mut value = 0u32;
    for _ in 0..width {
        let digit = chars
            .next_if(char::is_ascii_hexdigit)
            .and_then(|d| d.to_digit(16))
            .ok_or(DecodeError::TruncatedUniversal {
                segment,
                expected: width,
            })?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or(DecodeError::InvalidCodePoint { segment, value })
}
