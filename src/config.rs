//! Compiler configuration (`arabscript.toml`).

use crate::compiler::error::CompileError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "arabscript.toml";

/// Format for `--timings` output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimingsFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompilerConfig {
    #[serde(default)]
    pub naming: NamingConfig,
    /// Spaces per block level in generated code
    #[serde(default = "default_indent")]
    pub indent: usize,
}

/// Where readable names for identifiers come from.
///
/// `command` wins over `dictionary` when both are set; with neither, names
/// fall back to `var_1`, `var_2`, ...
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamingConfig {
    /// TOML file with a `[names]` table
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    /// External program; the identifier is passed as the last argument
    #[serde(default)]
    pub command: Option<Vec<String>>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_indent() -> usize {
    2
}

fn default_timeout_ms() -> u64 {
    2000
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            indent: default_indent(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            command: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CompilerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, CompileError> {
        toml::from_str(content).map_err(|e| CompileError::Config(e.to_string()))
    }

    /// Load configuration from a file.
    ///
    /// A relative dictionary path is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            CompileError::Config(message) => {
                CompileError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        if let (Some(dictionary), Some(dir)) = (&config.naming.dictionary, path.parent())
            && dictionary.is_relative()
        {
            config.naming.dictionary = Some(dir.join(dictionary));
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `arabscript.toml` from `dir` if it exists, otherwise the defaults.
    pub fn discover(dir: &Path) -> Result<Self, CompileError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
