//! C source generator for embedded web dashboards.
//!
//! Inlines a stylesheet and a script into an HTML template, then writes the merged page as a
//! C string constant with pointer and length accessors.

pub mod asset;
pub mod builder;
pub mod emit;
pub mod template;

pub use asset::{Asset, AssetRole};
pub use builder::{BuildError, BuildResult, EmbedBuilder, EmbedConfig, Generated};
pub use emit::{emit_c_source, CSourceOptions, EmitError};
pub use template::{compose, Substitutions, INLINE_CSS, INLINE_JS};
