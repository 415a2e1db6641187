//! Dashboard build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use webembed_codegen::{CSourceOptions, EmbedBuilder, EmbedConfig};
use webembed_literal::{AstralPolicy, DEFAULT_CHUNK_LEN};

/// Configuration file structure (embed.toml).
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub(crate) assets: AssetsConfig,
    #[serde(default)]
    pub(crate) output: OutputConfig,
    #[serde(default)]
    pub(crate) encoding: EncodingConfig,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetsConfig {
    #[serde(default = "default_template")]
    pub(crate) template: String,
    #[serde(default = "default_stylesheet")]
    pub(crate) stylesheet: String,
    #[serde(default = "default_script")]
    pub(crate) script: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutputConfig {
    #[serde(default = "default_output")]
    pub(crate) path: String,
    /// Header with the accessor declarations
    pub(crate) header: Option<String>,
    pub(crate) array: Option<String>,
    pub(crate) content_fn: Option<String>,
    pub(crate) len_fn: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EncodingConfig {
    #[serde(default = "default_chunk_size")]
    pub(crate) chunk_size: usize,
    #[serde(default = "default_astral")]
    pub(crate) astral: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            stylesheet: default_stylesheet(),
            script: default_script(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output(),
            header: None,
            array: None,
            content_fn: None,
            len_fn: None,
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            astral: default_astral(),
        }
    }
}

fn default_template() -> String {
    "web/dashboard.html".to_string()
}
fn default_stylesheet() -> String {
    "web/dashboard.css".to_string()
}
fn default_script() -> String {
    "web/dashboard.js".to_string()
}
fn default_output() -> String {
    "src/dashboard_embedded.c".to_string()
}
fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_LEN
}
fn default_astral() -> String {
    AstralPolicy::default().to_string()
}

/// Command-line values that take precedence over embed.toml.
#[derive(Debug, Default)]
pub struct Overrides {
    pub template: Option<PathBuf>,
    pub css: Option<PathBuf>,
    pub js: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub chunk_size: Option<usize>,
    pub wide_astral: bool,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub(crate) fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

/// Merge the config file with command-line overrides.
///
/// Relative paths from the config file are taken from `base`, the directory holding it.
/// Paths given on the command line are used as they are.
fn resolve(file: ConfigFile, overrides: Overrides, base: &Path) -> Result<EmbedConfig> {
    let astral = if overrides.wide_astral {
        AstralPolicy::Universal
    } else {
        file.encoding
            .astral
            .parse()
            .context("Invalid [encoding] astral setting")?
    };

    let (template, label) = match overrides.template {
        Some(path) => {
            let label = source_label(&path);
            (path, label)
        }
        None => (
            base.join(&file.assets.template),
            source_label(Path::new(&file.assets.template)),
        ),
    };

    let defaults = CSourceOptions::default();
    let c = CSourceOptions {
        header: file.output.header.unwrap_or(defaults.header),
        array_name: file.output.array.unwrap_or(defaults.array_name),
        content_fn: file.output.content_fn.unwrap_or(defaults.content_fn),
        len_fn: file.output.len_fn.unwrap_or(defaults.len_fn),
        source_label: label,
    };

    Ok(EmbedConfig {
        stylesheet: overrides
            .css
            .unwrap_or_else(|| base.join(&file.assets.stylesheet)),
        script: overrides
            .js
            .unwrap_or_else(|| base.join(&file.assets.script)),
        output: overrides
            .output
            .unwrap_or_else(|| base.join(&file.output.path)),
        max_chunk_len: overrides.chunk_size.unwrap_or(file.encoding.chunk_size),
        astral,
        c,
        template,
    })
}

/// Directory of the template, as shown in the generated banner.
fn source_label(template: &Path) -> String {
    match template.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => format!("{}/", dir.display()),
        _ => "./".to_string(),
    }
}

/// Run the build command.
pub fn run(config_path: &Path, overrides: Overrides) -> Result<()> {
    let base = config_path.parent().unwrap_or(Path::new(""));
    let config = resolve(load_config(config_path)?, overrides, base)?;

    tracing::info!(
        "Embedding {} with {} and {}",
        config.template.display(),
        config.stylesheet.display(),
        config.script.display()
    );

    let result = EmbedBuilder::new(config)?.build()?;

    tracing::info!(
        "Embedded {} bytes in {} literal segments in {}ms",
        result.embedded_bytes,
        result.chunks,
        result.duration_ms
    );

    Ok(())
}
