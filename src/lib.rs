//! cv-generator - résumé records to Awesome-CV LaTeX
//!
//! This library provides a parser for the JSON and key-value text résumé
//! dialects, a lint pass, and a renderer for the Awesome-CV document class.
//!
//! # Example
//!
//! ```rust
//! use cv_generator::{render, InputFormat};
//!
//! let tex = render(r#"{"FirstName": "Ada", "LastName": "Lovelace"}"#, InputFormat::Json).unwrap();
//! assert!(tex.contains(r"\name{Ada}{Lovelace}"));
//! ```

pub mod config;
pub mod error;
pub mod lint;
pub mod parser;
pub mod renderer;
pub mod theme;

pub use config::{ConfigError, GeneratorConfig};
pub use error::ParseError;
pub use lint::{LintCategory, LintWarning};
pub use parser::{
    parse, parse_file, parse_with_skipped, Document, InputFormat, Parsed, ResumeRecord,
    SkipReason, Skipped,
};
pub use renderer::{
    escape_latex, render_latex, render_markup, FontSize, HeaderAlignment, LatexConfig, Paper,
};
pub use theme::{Theme, ThemeError};

use thiserror::Error;
use tracing::info;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while reading the input document
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Unknown theme name
    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Input dialect
    pub format: InputFormat,
    /// Accent color
    pub theme: Theme,
    /// Document options
    pub latex: LatexConfig,
    /// Run lint checks and log their findings
    pub lint: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the document options
    pub fn with_latex(mut self, config: LatexConfig) -> Self {
        self.latex = config;
        self
    }

    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Render a document in the given dialect with the default theme and options
///
/// # Example
///
/// ```rust
/// use cv_generator::{render, InputFormat};
///
/// let tex = render(r#"
/// Section- "Skills"
/// Category- "Langs"
/// Skills- "Go, Rust"
/// "#, InputFormat::Text).unwrap();
///
/// assert!(tex.contains(r"\cvskill"));
/// assert!(tex.contains("Go, Rust"));
/// ```
pub fn render(source: &str, format: InputFormat) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::new().with_format(format))
}

/// Render a document with custom configuration
///
/// # Example
///
/// ```rust
/// use cv_generator::{render_with_config, InputFormat, LatexConfig, RenderConfig, Theme};
///
/// let config = RenderConfig::new()
///     .with_format(InputFormat::Json)
///     .with_theme(Theme::Emerald)
///     .with_latex(LatexConfig::default().with_footer(false));
///
/// let tex = render_with_config("{}", config).unwrap();
/// assert!(tex.contains("00A388"));
/// assert!(!tex.contains(r"\makecvfooter"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    render_with_lint(source, config).map(|(tex, _)| tex)
}

/// Everything one pipeline run produces
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub latex: String,
    /// The normalized record the LaTeX was rendered from
    pub record: ResumeRecord,
    /// Lint findings, empty unless `RenderConfig::lint` is set
    pub warnings: Vec<LintWarning>,
}

/// Render a document and return lint findings alongside the source.
/// Findings are only collected when `config.lint` is set.
pub fn render_with_lint(
    source: &str,
    config: RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    render_full(source, config).map(|output| (output.latex, output.warnings))
}

/// Run the whole pipeline: parse, lint when enabled, and render.
/// Lint findings include the input the parser had to skip.
pub fn render_full(source: &str, config: RenderConfig) -> Result<RenderOutput, RenderError> {
    let parsed = parse_with_skipped(source, config.format)?;

    let warnings = if config.lint {
        lint::check_parsed(&parsed)
    } else {
        Vec::new()
    };
    for warning in &warnings {
        info!(category = %warning.category, "{}", warning.message);
    }

    let latex = render_latex(&parsed.record, config.theme, &config.latex);
    info!(
        theme = %config.theme,
        bytes = latex.len(),
        warnings = warnings.len(),
        "rendered document"
    );
    Ok(RenderOutput {
        latex,
        record: parsed.record,
        warnings,
    })
}

/// Render with a theme given by name. The name is validated before the
/// input is parsed, so an unknown theme never produces output.
pub fn render_with_theme_name(
    source: &str,
    format: InputFormat,
    theme: &str,
) -> Result<String, RenderError> {
    let theme: Theme = theme.parse()?;
    render_with_config(
        source,
        RenderConfig::new().with_format(format).with_theme(theme),
    )
}
