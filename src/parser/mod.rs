//! Record parser for the JSON and text résumé dialects

mod json;
pub mod lexer;
pub mod record;
pub mod skipped;
mod text;

use std::path::Path;

use tracing::debug;

pub use json::{parse_json, parse_json_with_skipped};
pub use record::*;
pub use skipped::{SkipReason, Skipped};
pub use text::{parse_text, parse_text_with_skipped};

use crate::error::ParseError;

/// Input dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    Json,
    #[default]
    Text,
}

impl InputFormat {
    /// `.json` (any case) selects JSON; every other extension is text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Text,
        }
    }
}

/// Source text tagged with its dialect
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    Json(&'a str),
    Text(&'a str),
}

impl<'a> Document<'a> {
    pub fn new(source: &'a str, format: InputFormat) -> Self {
        match format {
            InputFormat::Json => Document::Json(source),
            InputFormat::Text => Document::Text(source),
        }
    }

    /// Parse into the canonical record
    pub fn parse(self) -> Result<ResumeRecord, ParseError> {
        self.parse_with_skipped().map(|parsed| parsed.record)
    }

    /// Parse, keeping track of the input that did not reach the record
    pub fn parse_with_skipped(self) -> Result<Parsed, ParseError> {
        let (record, skipped) = match self {
            Document::Json(source) => parse_json_with_skipped(source)?,
            Document::Text(source) => parse_text_with_skipped(source),
        };
        debug!(
            work = record.work_experience.len(),
            education = record.education.len(),
            skills = record.skills.len(),
            certificates = record.certificates.len(),
            honors = record.honors.len(),
            skipped = skipped.len(),
            "parsed record"
        );
        Ok(Parsed { record, skipped })
    }
}

/// A parsed record together with what was skipped on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub record: ResumeRecord,
    pub skipped: Vec<Skipped>,
}

/// Parse source text in the given dialect
pub fn parse(source: &str, format: InputFormat) -> Result<ResumeRecord, ParseError> {
    Document::new(source, format).parse()
}

/// Parse source text, also returning skipped input
pub fn parse_with_skipped(source: &str, format: InputFormat) -> Result<Parsed, ParseError> {
    Document::new(source, format).parse_with_skipped()
}

/// Read and parse a file. Without an explicit format the extension decides.
pub fn parse_file(path: &Path, format: Option<InputFormat>) -> Result<ResumeRecord, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    parse(&source, format)
}
