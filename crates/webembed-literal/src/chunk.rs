//! Splitting escaped text into boundary-safe literal segments.

use crate::escape::{is_narrow_hex, unit_len, AstralPolicy, EscapedText, MAX_ESCAPE_LEN};

/// Default upper bound on the length of one literal segment, in escaped characters.
pub const DEFAULT_CHUNK_LEN: usize = 2000;

/// Errors raised when configuring a [`LiteralEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncoderError {
    #[error(
        "Chunk length {0} is too small: escape sequences can be {max} characters long",
        max = MAX_ESCAPE_LEN
    )]
    ChunkTooSmall(usize),

    #[error("Unknown astral policy '{0}' (expected 'truncate' or 'universal')")]
    UnknownAstralPolicy(String),
}

/// Escapes text and cuts it into chunks that are safe to emit as adjacent C literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralEncoder {
    max_chunk_len: usize,
    astral: AstralPolicy,
}

impl LiteralEncoder {
    /// Create an encoder whose chunks hold at most `max_chunk_len` escaped characters.
    pub fn new(max_chunk_len: usize) -> Result<Self, EncoderError> {
        if max_chunk_len < MAX_ESCAPE_LEN {
            return Err(EncoderError::ChunkTooSmall(max_chunk_len));
        }
        Ok(Self {
            max_chunk_len,
            astral: AstralPolicy::default(),
        })
    }

    /// Use `policy` for code points above U+FFFF.
    pub fn with_astral_policy(mut self, policy: AstralPolicy) -> Self {
        self.astral = policy;
        self
    }

    pub fn max_chunk_len(&self) -> usize {
        self.max_chunk_len
    }

    pub fn astral_policy(&self) -> AstralPolicy {
        self.astral
    }

    /// Escape `text` with this encoder's policy.
    pub fn escape(&self, text: &str) -> EscapedText {
        EscapedText::new(text, self.astral)
    }

    /// Iterate over the chunks of already escaped text.
    pub fn chunks<'a>(&self, escaped: &'a EscapedText) -> Chunks<'a> {
        Chunks {
            text: escaped.as_str(),
            pos: 0,
            max_len: self.max_chunk_len,
        }
    }

    /// Escape `text` and split it into chunks.
    ///
    /// Concatenating the result gives back `self.escape(text)`. Empty input yields no chunks.
    pub fn encode(&self, text: &str) -> Vec<String> {
        let escaped = self.escape(text);
        self.chunks(&escaped).map(str::to_owned).collect()
    }
}

impl Default for LiteralEncoder {
    fn default() -> Self {
        Self {
            max_chunk_len: DEFAULT_CHUNK_LEN,
            astral: AstralPolicy::default(),
        }
    }
}

/// Encode `text` with the default chunk length and astral policy.
pub fn encode(text: &str) -> Vec<String> {
    LiteralEncoder::default().encode(text)
}

/// Iterator over the chunks of an [`EscapedText`], produced by [`LiteralEncoder::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: &'a str,
    pos: usize,
    max_len: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let end = next_boundary(self.text.as_bytes(), start, self.max_len);
        self.pos = end;
        Some(&self.text[start..end])
    }
}

/// Find where the chunk starting at `start` ends.
///
/// Boundaries only ever fall between escape units, so a chunk cannot end with a lone
/// backslash or with half of `\xNN`. A `\xNN` followed by a hex digit ends the chunk early:
/// C's `\x` escape would otherwise swallow that digit.
///
/// The cut goes after the first such collision, not the last one in the window: any earlier
/// collision left inside the chunk would still be misread by the compiler.
fn next_boundary(bytes: &[u8], start: usize, max_len: usize) -> usize {
    let limit = bytes.len().min(start + max_len);
    let mut end = start;

    while end < bytes.len() {
        let len = unit_len(bytes, end);
        if end + len > limit {
            break;
        }
        let unit_start = end;
        end += len;
        if is_narrow_hex(bytes, unit_start, len)
            && bytes.get(end).is_some_and(u8::is_ascii_hexdigit)
        {
            break;
        }
    }

    if end == start {
        // Only reachable with a window narrower than one escape; take the unit whole.
        start + unit_len(bytes, start)
    } else {
        end
    }
}
