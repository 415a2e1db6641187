//! Escaping and boundary-safe chunking of text into C string literals.
//!
//! This crate turns arbitrary UTF-8 text into an ordered list of escaped chunks, each of
//! which can be emitted as one segment of a sequence of adjacent C string literals.

pub mod chunk;
pub mod decode;
pub mod escape;

pub use chunk::{encode, Chunks, EncoderError, LiteralEncoder, DEFAULT_CHUNK_LEN};
pub use decode::{decode_segments, DecodeError};
pub use escape::{decoded_len, escape, AstralPolicy, EscapedText, MAX_ESCAPE_LEN};
