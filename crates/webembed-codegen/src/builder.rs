//! Dashboard embedding pipeline.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use webembed_literal::{
    decoded_len, AstralPolicy, EncoderError, LiteralEncoder, DEFAULT_CHUNK_LEN,
};

use crate::asset::{Asset, AssetRole};
use crate::emit::{emit_c_source, CSourceOptions, EmitError};
use crate::template::compose;

/// Configuration for generating an embedded dashboard.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// HTML template with `{{INLINE_CSS}}` / `{{INLINE_JS}}` placeholders
    pub template: PathBuf,

    /// Stylesheet to inline
    pub stylesheet: PathBuf,

    /// Script to inline
    pub script: PathBuf,

    /// Generated C file, overwritten on every build
    pub output: PathBuf,

    /// Longest literal segment, in escaped characters
    pub max_chunk_len: usize,

    /// Handling of code points above U+FFFF
    pub astral: AstralPolicy,

    /// Names used in the generated C
    pub c: CSourceOptions,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("web/dashboard.html"),
            stylesheet: PathBuf::from("web/dashboard.css"),
            script: PathBuf::from("web/dashboard.js"),
            output: PathBuf::from("src/dashboard_embedded.c"),
            max_chunk_len: DEFAULT_CHUNK_LEN,
            astral: AstralPolicy::default(),
            c: CSourceOptions::default(),
        }
    }
}

/// Generated source plus what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Complete C source text
    pub source: String,

    /// Number of literal segments
    pub chunks: usize,

    /// Length of the escaped page
    pub escaped_len: usize,

    /// Bytes the compiler stores for the page, without the terminator
    pub embedded_bytes: usize,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of literal segments written
    pub chunks: usize,

    /// Bytes the compiler stores for the page
    pub embedded_bytes: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Path of the generated file
    pub output: PathBuf,
}

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing {role}: {}", .path.display())]
    MissingAsset { role: AssetRole, path: PathBuf },

    #[error("Failed to read {}: {message}", .path.display())]
    ReadError { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", .path.display())]
    WriteError { path: PathBuf, message: String },

    #[error(transparent)]
    Encoder(#[from] EncoderError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Reads the dashboard assets and writes the generated C file.
pub struct EmbedBuilder {
    config: EmbedConfig,
    encoder: LiteralEncoder,
}

impl EmbedBuilder {
    /// Create a builder, rejecting settings that could not produce valid C.
    pub fn new(config: EmbedConfig) -> Result<Self, BuildError> {
        let encoder = LiteralEncoder::new(config.max_chunk_len)?.with_astral_policy(config.astral);
        config.c.validate()?;
        Ok(Self { config, encoder })
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Generate the C source for already loaded asset text.
    pub fn generate(&self, template: &str, css: &str, js: &str) -> Result<Generated, BuildError> {
        let page = compose(template, css, js);
        let escaped = self.encoder.escape(&page);
        let chunks: Vec<&str> = self.encoder.chunks(&escaped).collect();
        let source = emit_c_source(&chunks, &self.config.c)?;

        tracing::debug!(
            "Encoded {} bytes of HTML into {} literal segments",
            page.len(),
            chunks.len()
        );

        Ok(Generated {
            source,
            chunks: chunks.len(),
            escaped_len: escaped.len(),
            embedded_bytes: decoded_len(&page, self.encoder.astral_policy()),
        })
    }

    /// Read the assets, generate the source, and overwrite the output file.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let template = Asset::read(AssetRole::Template, &self.config.template)?;
        let stylesheet = Asset::read(AssetRole::Stylesheet, &self.config.stylesheet)?;
        let script = Asset::read(AssetRole::Script, &self.config.script)?;

        let generated = self.generate(&template.text, &stylesheet.text, &script.text)?;

        let output = &self.config.output;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(output, &generated.source).map_err(|e| BuildError::WriteError {
            path: output.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Wrote {}", output.display());

        Ok(BuildResult {
            chunks: generated.chunks,
            embedded_bytes: generated.embedded_bytes,
            duration_ms: start.elapsed().as_millis() as u64,
            output: output.clone(),
        })
    }
}
