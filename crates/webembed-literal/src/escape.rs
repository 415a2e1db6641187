//! Per-character escaping into the C string-literal grammar.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::chunk::EncoderError;

/// Length of the longest escape sequence the escaper can produce (`\UXXXXXXXX`).
pub const MAX_ESCAPE_LEN: usize = 10;

/// How code points above U+FFFF are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AstralPolicy {
    /// Emit `\xNN` with the low 8 bits of the code point.
    ///
    /// This loses information: U+1F600 becomes `\x00`. It is kept as the default so the
    /// generated output matches existing dashboards byte for byte.
    #[default]
    Truncate,

    /// Emit `\UXXXXXXXX`, which C compilers store as the UTF-8 encoding of the code point.
    Universal,
}

impl AstralPolicy {
    /// The name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            AstralPolicy::Truncate => "truncate",
            AstralPolicy::Universal => "universal",
        }
    }
}

impl fmt::Display for AstralPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AstralPolicy {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "truncate" => Ok(AstralPolicy::Truncate),
            "universal" => Ok(AstralPolicy::Universal),
            other => Err(EncoderError::UnknownAstralPolicy(other.to_string())),
        }
    }
}

/// Text that went through [`escape`].
///
/// Always pure ASCII, and always a sequence of whole escape units, which is what lets the
/// chunker cut it without looking back at the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedText {
    text: String,
}

impl EscapedText {
    /// Escape `text` with the given policy for astral code points.
    pub fn new(text: &str, policy: AstralPolicy) -> Self {
        let mut escaped = String::with_capacity(text.len() + text.len() / 8);
        for c in text.chars() {
            push_escaped(&mut escaped, c, policy);
        }
        Self { text: escaped }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for EscapedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for EscapedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Escape `text` using the default [`AstralPolicy`].
pub fn escape(text: &str) -> EscapedText {
    EscapedText::new(text, AstralPolicy::default())
}

/// Append the escaped form of `c` to `out`.
fn push_escaped(out: &mut String, c: char, policy: AstralPolicy) {
    match c {
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        ' '..='~' => out.push(c),
        _ => {
            let code = c as u32;
            // Writing into a String cannot fail.
            let _ = match code {
                0x100..=0xFFFF => write!(out, "\\u{:04x}", code),
                0x10000.. if policy == AstralPolicy::Universal => write!(out, "\\U{:08x}", code),
                _ => write!(out, "\\x{:02x}", code & 0xFF),
            };
        }
    }
}

/// Number of bytes a C compiler stores for the literal built from `text`, without the
/// terminating NUL.
///
/// Code points U+0080 to U+00FF are written as `\xNN` and stored as that single byte, so
/// they come out as Latin-1 rather than UTF-8. This is a known limitation of the escape table.
pub fn decoded_len(text: &str, policy: AstralPolicy) -> usize {
    text.chars()
        .map(|c| match c as u32 {
            0x100..=0xFFFF => c.len_utf8(),
            0x10000.. if policy == AstralPolicy::Universal => c.len_utf8(),
            _ => 1,
        })
        .sum()
}

/// Length of the escape unit starting at `pos` in escaper output.
///
/// `bytes` must come from an [`EscapedText`]; a backslash there always opens one of the
/// escapes written by `push_escaped`.
pub(crate) fn unit_len(bytes: &[u8], pos: usize) -> usize {
    if bytes[pos] != b'\\' {
        return 1;
    }
    match bytes.get(pos + 1) {
        Some(b'x') => 4,
        Some(b'u') => 6,
        Some(b'U') => 10,
        _ => 2,
    }
}

/// Whether the unit at `pos` (of length `len`) is a two-digit `\xNN` escape.
pub(crate) fn is_narrow_hex(bytes: &[u8], pos: usize, len: usize) -> bool {
    len == 4 && bytes[pos] == b'\\' && bytes[pos + 1] == b'x'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_quotes_backslashes_and_newlines() {
        assert_eq!(escape("a\"b\\c\n").as_str(), r#"a\"b\\c\n"#);
    }

    #[test]
    fn escapes_carriage_return_and_tab() {
        assert_eq!(escape("x\r\ty").as_str(), r"x\r\ty");
    }

    #[test]
    fn printable_ascii_passes_through() {
        let printable: String = (' '..='~').filter(|c| *c != '\\' && *c != '"').collect();
        assert_eq!(escape(&printable).as_str(), printable);
    }

    #[test]
    fn control_characters_use_narrow_hex() {
        assert_eq!(escape("\x07").as_str(), r"\x07");
        assert_eq!(escape("\0").as_str(), r"\x00");
        assert_eq!(escape("\x1b[0m").as_str(), r"\x1b[0m");
        assert_eq!(escape("\x7f").as_str(), r"\x7f");
    }

    #[test]
    fn latin1_uses_narrow_hex() {
        assert_eq!(escape("é").as_str(), r"\xe9");
        assert_eq!(escape("\u{ff}").as_str(), r"\xff");
    }

    #[test]
    fn bmp_uses_four_digit_universal_name() {
        assert_eq!(escape("\u{100}").as_str(), r"\u0100");
        assert_eq!(escape("°C → ✓").as_str(), r"\xb0C \u2192 \u2713");
        assert_eq!(escape("\u{ffff}").as_str(), r"\uffff");
    }

    #[test]
    fn astral_code_points_are_masked_by_default() {
        // U+1F600 keeps only its low byte.
        assert_eq!(escape("\u{1F600}").as_str(), r"\x00");
        assert_eq!(escape("\u{1F321}").as_str(), r"\x21");
    }

    #[test]
    fn astral_code_points_widen_with_universal_policy() {
        let escaped = EscapedText::new("\u{1F600}", AstralPolicy::Universal);
        assert_eq!(escaped.as_str(), r"\U0001f600");
        assert_eq!(escaped.len(), MAX_ESCAPE_LEN);
    }

    #[test]
    fn hex_digits_are_lowercase() {
        assert_eq!(escape("\u{ABCD}\x1F").as_str(), r"\uabcd\x1f");
    }

    #[test]
    fn empty_input_escapes_to_empty() {
        assert!(escape("").is_empty());
    }

    #[test]
    fn output_is_ascii() {
        let escaped = escape("naïve ☃ \u{1F600} \u{7}");
        assert!(escaped.as_str().is_ascii());
    }

    #[test]
    fn decoded_len_counts_compiler_bytes() {
        assert_eq!(decoded_len("abc\n", AstralPolicy::Truncate), 4);
        // \xe9 is one byte, ✓ is stored as three UTF-8 bytes.
        assert_eq!(decoded_len("é✓", AstralPolicy::Truncate), 4);
        assert_eq!(decoded_len("\u{1F600}", AstralPolicy::Truncate), 1);
        assert_eq!(decoded_len("\u{1F600}", AstralPolicy::Universal), 4);
    }

    #[test]
    fn unit_len_follows_escape_grammar() {
        let escaped = EscapedText::new("a\\\u{e9}\u{2713}\u{1F600}", AstralPolicy::Universal);
        let bytes = escaped.as_str().as_bytes();
        let mut lens = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            let len = unit_len(bytes, pos);
            lens.push(len);
            pos += len;
        }
        assert_eq!(lens, vec![1, 2, 4, 6, 10]);
    }

    #[test]
    fn parses_astral_policy_names() {
        assert_eq!("truncate".parse::<AstralPolicy>().unwrap(), AstralPolicy::Truncate);
        assert_eq!("universal".parse::<AstralPolicy>().unwrap(), AstralPolicy::Universal);
        assert!("surrogates".parse::<AstralPolicy>().is_err());
        assert_eq!(AstralPolicy::Universal.to_string(), "universal");
    }
}
