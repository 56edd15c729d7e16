//! Generator configuration file
//!
//! Holds defaults for the theme, document options and output location so a
//! résumé can be regenerated without repeating command-line flags. Every key
//! is optional; command-line flags take precedence.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::{FontSize, HeaderAlignment, LatexConfig, Paper};
use crate::theme::Theme;

/// Errors that can occur when loading or parsing the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Accent theme; unknown names fail to parse
    pub theme: Option<Theme>,
    pub document: DocumentOptions,
    pub output: OutputOptions,
}

/// Overrides for [`LatexConfig`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// 10, 11 or 12; other sizes fail to parse
    pub font_size: Option<FontSize>,
    /// `a4paper` or `letterpaper`
    pub paper: Option<Paper>,
    pub header_alignment: Option<HeaderAlignment>,
    pub section_highlight: Option<bool>,
    pub footer: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub directory: PathBuf,
    /// File stem of the generated `.tex` file
    pub file_name: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            file_name: "resume".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Document options layered over the defaults
    pub fn latex_config(&self) -> LatexConfig {
        let doc = &self.document;
        let mut config = LatexConfig::default();
        if let Some(size) = doc.font_size {
            config = config.with_font_size(size);
        }
        if let Some(paper) = doc.paper {
            config = config.with_paper(paper);
        }
        if let Some(alignment) = doc.header_alignment {
            config = config.with_header_alignment(alignment);
        }
        if let Some(highlight) = doc.section_highlight {
            config = config.with_section_highlight(highlight);
        }
        if let Some(footer) = doc.footer {
            config = config.with_footer(footer);
        }
        config
    }

    /// Path of the generated `.tex` file
    pub fn output_path(&self) -> PathBuf {
        self.output
            .directory
            .join(format!("{}.tex", self.output.file_name))
    }
}
