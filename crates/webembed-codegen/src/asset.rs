//! Dashboard source assets.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// What an asset is used for in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRole {
    /// HTML template containing the inline placeholders
    Template,
    /// CSS inlined in place of `{{INLINE_CSS}}`
    Stylesheet,
    /// JavaScript inlined in place of `{{INLINE_JS}}`
    Script,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetRole::Template => "template",
            AssetRole::Stylesheet => "stylesheet",
            AssetRole::Script => "script",
        })
    }
}

/// A text asset loaded into memory.
#[derive(Debug, Clone)]
pub struct Asset {
    pub role: AssetRole,
    pub path: PathBuf,
    pub text: String,
}

impl Asset {
    /// Read the asset at `path`.
    ///
    /// A missing file is reported as [`BuildError::MissingAsset`] naming the path.
    pub fn read(role: AssetRole, path: &Path) -> Result<Self, BuildError> {
        if !path.is_file() {
            return Err(BuildError::MissingAsset {
                role,
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|e| BuildError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!("Read {} from {} ({} bytes)", role, path.display(), text.len());

        Ok(Self {
            role,
            path: path.to_path_buf(),
            text,
        })
    }
}
