//! Highlighting configuration
//!
//! The defaults live in `defaults/codeframe.default.toml`, compiled into the library. Keys:
//! `highlight.max_lines`, `highlight.tab_width` and `highlight.redaction`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/codeframe.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeframeConfig {
    pub highlight: HighlightConfig,
}

/// Knobs for highlighting and windowing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Lines shown in a rendered window
    pub max_lines: usize,
    /// Spaces per expanded tab
    pub tab_width: usize,
    /// Replacement text for sensitive regions
    pub redaction: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            max_lines: 15,
            tab_width: 4,
            redaction: "*****".to_string(),
        }
    }
}

/// Builds a [CodeframeConfig]: embedded defaults first, then TOML files, then single-key overrides
///
/// Later layers win key by key, so a file setting only `highlight.redaction` keeps the default
/// window size.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Loader {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a TOML file; [build](Self::build) fails if it cannot be read
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let file = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Override one dotted key, e.g. `highlight.redaction`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Override `highlight.max_lines`
    pub fn with_max_lines(self, max_lines: usize) -> Result<Self, ConfigError> {
        let max_lines = i64::try_from(max_lines).unwrap_or(i64::MAX);
        self.set_override("highlight.max_lines", max_lines)
    }

    pub fn build(self) -> Result<CodeframeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<CodeframeConfig, ConfigError> {
    Loader::new().build()
}
