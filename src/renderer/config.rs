//! Configuration for LaTeX rendering

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Alignment of the `\makecvheader` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum HeaderAlignment {
    #[serde(rename = "L", alias = "left")]
    Left,
    #[default]
    #[serde(rename = "C", alias = "center")]
    Center,
    #[serde(rename = "R", alias = "right")]
    Right,
}

impl HeaderAlignment {
    /// Option letter understood by the Awesome-CV class
    pub fn letter(self) -> char {
        match self {
            HeaderAlignment::Left => 'L',
            HeaderAlignment::Center => 'C',
            HeaderAlignment::Right => 'R',
        }
    }
}

/// Paper sizes the class is laid out for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Paper {
    #[default]
    #[serde(rename = "a4paper", alias = "a4")]
    A4,
    #[serde(rename = "letterpaper", alias = "letter")]
    Letter,
}

impl Paper {
    /// Option passed to `\documentclass`
    pub fn option(self) -> &'static str {
        match self {
            Paper::A4 => "a4paper",
            Paper::Letter => "letterpaper",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported font size {0}pt (expected 10, 11 or 12)")]
pub struct FontSizeError(pub u8);

/// Base font size; the class only supports 10, 11 and 12pt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum FontSize {
    Pt10,
    #[default]
    Pt11,
    Pt12,
}

impl FontSize {
    pub fn points(self) -> u8 {
        match self {
            FontSize::Pt10 => 10,
            FontSize::Pt11 => 11,
            FontSize::Pt12 => 12,
        }
    }
}

impl TryFrom<u8> for FontSize {
    type Error = FontSizeError;

    fn try_from(points: u8) -> Result<Self, Self::Error> {
        match points {
            10 => Ok(FontSize::Pt10),
            11 => Ok(FontSize::Pt11),
            12 => Ok(FontSize::Pt12),
            other => Err(FontSizeError(other)),
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.points())
    }
}

/// Configuration options for the generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexConfig {
    pub font_size: FontSize,

    /// Paper option passed to `\documentclass`
    pub paper: Paper,

    /// Header alignment
    pub header_alignment: HeaderAlignment,

    /// Color the first letters of section titles with the accent color
    pub section_highlight: bool,

    /// Whether to emit `\makecvfooter`
    pub footer: bool,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            font_size: FontSize::Pt11,
            paper: Paper::A4,
            header_alignment: HeaderAlignment::Center,
            section_highlight: true,
            footer: true,
        }
    }
}

impl LatexConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: FontSize) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_paper(mut self, paper: Paper) -> Self {
        self.paper = paper;
        self
    }

    pub fn with_header_alignment(mut self, alignment: HeaderAlignment) -> Self {
        self.header_alignment = alignment;
        self
    }

    pub fn with_section_highlight(mut self, highlight: bool) -> Self {
        self.section_highlight = highlight;
        self
    }

    pub fn with_footer(mut self, footer: bool) -> Self {
        self.footer = footer;
        self
    }
}
